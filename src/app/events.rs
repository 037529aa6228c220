//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them: log to serial, forward to a dashboard, etc.

use crate::app::commands::ReportRequest;
use crate::control::threshold::ActuatorState;
use crate::error::{ClockError, SensorError};
use crate::history::HistoryEntry;
use crate::sensors::Reading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries the effective history capacity).
    Started { history_capacity: usize },

    /// At least one relay changed between two ticks.
    ActuatorsChanged {
        from: ActuatorState,
        to: ActuatorState,
    },

    /// A sample was committed to the history log.
    SampleRecorded(HistoryEntry),

    /// The reading for this tick was unusable; the previous actuator state
    /// stays in force.
    ReadingRejected(SensorError),

    /// The tick evaluated but no timestamp was available, so nothing was
    /// recorded.
    ClockUnavailable(ClockError),

    /// A report was rendered for a client.
    ReportServed {
        request: ReportRequest,
        bytes: usize,
        rows_omitted: usize,
    },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub tick_count: u32,
    pub reading: Option<Reading>,
    pub actuators: ActuatorState,
    pub history_len: usize,
    pub history_capacity: usize,
}
