//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::threshold::ActuatorState;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// `lights=ON fan=OFF humidifier=ON`
struct Actuators<'a>(&'a ActuatorState);

impl core::fmt::Display for Actuators<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let on_off = |on: bool| if on { "ON" } else { "OFF" };
        write!(
            f,
            "lights={} fan={} humidifier={}",
            on_off(self.0.lights),
            on_off(self.0.fan),
            on_off(self.0.humidifier)
        )
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => match t.reading {
                Some(r) => info!(
                    "TELEM | tick={} | T={:.1}\u{00b0}C H={:.1}% L={:.1}% | {} | history={}/{}",
                    t.tick_count,
                    r.temperature,
                    r.humidity,
                    r.luminosity,
                    Actuators(&t.actuators),
                    t.history_len,
                    t.history_capacity,
                ),
                None => info!(
                    "TELEM | tick={} | no reading yet | {} | history={}/{}",
                    t.tick_count,
                    Actuators(&t.actuators),
                    t.history_len,
                    t.history_capacity,
                ),
            },
            AppEvent::ActuatorsChanged { from, to } => {
                info!("ACT | {} -> {}", Actuators(from), Actuators(to));
            }
            AppEvent::SampleRecorded(entry) => {
                info!(
                    "TICK | recorded {} T={:.1}\u{00b0}C H={:.1}%",
                    entry.timestamp, entry.temperature, entry.humidity
                );
            }
            AppEvent::ReadingRejected(e) => {
                warn!("TICK | reading rejected: {e}");
            }
            AppEvent::ClockUnavailable(e) => {
                warn!("TICK | not recorded: {e}");
            }
            AppEvent::ReportServed {
                request,
                bytes,
                rows_omitted,
            } => {
                info!(
                    "REPORT | {} {} bytes, {} rows omitted",
                    request.label(),
                    bytes,
                    rows_omitted
                );
            }
            AppEvent::Started { history_capacity } => {
                info!("START | history_capacity={history_capacity}");
            }
        }
    }
}
