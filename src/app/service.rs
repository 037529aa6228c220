//! Application service: the hexagonal core.
//!
//! [`Controller`] owns the thresholds, the history log and the last
//! commanded actuator state.  It exposes a clean, hardware-agnostic API.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!    SourcePort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!     ClockPort ──▶ │        Controller         │
//!  ActuatorPort ◀── │ evaluate · history · map  │ ──▶ Report (HTML / CSV)
//! IndicatorPort ◀── │                           │
//!   DisplayPort ◀── └──────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::control::threshold::{self, ActuatorState, Thresholds};
use crate::error::{self, Error, RenderError};
use crate::history::{HistoryEntry, HistoryLog, HistorySnapshot};
use crate::indicator::{self, IndicatorGrid};
use crate::report::{
    self, DisplayFrame, EXPORT_DOC_CAPACITY, RenderedDocument, ReportContext,
    STATUS_DOC_CAPACITY,
};
use crate::sensors::Reading;

use super::commands::{Report, ReportRequest};
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, ClockPort, DisplayPort, EventSink, IndicatorPort, SourcePort};

// ───────────────────────────────────────────────────────────────
// TickOutcome
// ───────────────────────────────────────────────────────────────

/// What a single control cycle achieved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Actuators applied and the sample committed to history.
    Recorded(ActuatorState),
    /// Actuators applied, but no timestamp was available so nothing was
    /// recorded.
    Partial {
        actuators: ActuatorState,
        cause: Error,
    },
    /// The reading was unusable; nothing changed.
    Skipped(Error),
}

impl TickOutcome {
    /// Actuator state applied during the tick, if evaluation ran.
    pub fn actuators(&self) -> Option<ActuatorState> {
        match *self {
            Self::Recorded(state) | Self::Partial { actuators: state, .. } => Some(state),
            Self::Skipped(_) => None,
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }
}

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// The controller orchestrates all domain logic.
pub struct Controller {
    config: ControllerConfig,
    thresholds: Thresholds,
    history: HistoryLog,
    actuators: ActuatorState,
    last_reading: Option<Reading>,
    /// Unscaled grid last pushed to the indicator port.
    indicator: IndicatorGrid,
    indicator_pushed: bool,
    tick_count: u32,
}

impl Controller {
    /// Construct the controller.  An invalid configuration is refused
    /// with [`Error::Config`].
    pub fn new(config: ControllerConfig) -> error::Result<Self> {
        config.validate()?;
        Ok(Self {
            thresholds: config.thresholds(),
            history: HistoryLog::new(config.history_capacity),
            config,
            actuators: ActuatorState::ALL_OFF,
            last_reading: None,
            indicator: IndicatorGrid::default(),
            indicator_pushed: false,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every output to its safe state and announce the start.
    pub fn start(
        &mut self,
        hw: &mut (impl ActuatorPort + IndicatorPort + DisplayPort),
        sink: &mut impl EventSink,
    ) {
        hw.apply(ActuatorState::ALL_OFF);
        hw.show(&IndicatorGrid::default());
        self.actuators = ActuatorState::ALL_OFF;
        self.indicator = IndicatorGrid::default();
        self.indicator_pushed = true;
        hw.show_text(&self.render_display(None));
        sink.emit(&AppEvent::Started {
            history_capacity: self.history.capacity(),
        });
        info!(
            "Controller started (history capacity {})",
            self.history.capacity()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: read → evaluate → actuators → indicator
    /// → history → panel.
    ///
    /// The `hw` parameter satisfies the source, actuator, indicator and
    /// display ports at once; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SourcePort + ActuatorPort + IndicatorPort + DisplayPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.tick_count = self.tick_count.wrapping_add(1);

        // 1. Read and sanitise
        let reading = match hw.read().and_then(Reading::sanitize) {
            Ok(reading) => reading,
            Err(e) => {
                warn!("Tick {}: reading rejected: {e}", self.tick_count);
                sink.emit(&AppEvent::ReadingRejected(e));
                return TickOutcome::Skipped(e.into());
            }
        };
        self.last_reading = Some(reading);

        // 2. Evaluate and apply
        let next = threshold::evaluate(reading, self.thresholds);
        let prev = self.actuators;
        hw.apply(next);
        self.actuators = next;
        if next != prev {
            sink.emit(&AppEvent::ActuatorsChanged {
                from: prev,
                to: next,
            });
        }

        // 3. Indicator (only pushed on change)
        let grid = indicator::map(&next);
        if !self.indicator_pushed || grid != self.indicator {
            hw.show(&grid.scaled(self.config.indicator_brightness));
            self.indicator = grid;
            self.indicator_pushed = true;
        }

        // 4. Timestamp and record
        let now = clock.now();
        let outcome = match now {
            Ok(timestamp) => {
                let entry = HistoryEntry {
                    temperature: reading.temperature,
                    humidity: reading.humidity,
                    timestamp,
                };
                self.history.record(entry);
                sink.emit(&AppEvent::SampleRecorded(entry));
                debug!("Tick {}: recorded {entry:?}", self.tick_count);
                TickOutcome::Recorded(next)
            }
            Err(e) => {
                warn!("Tick {}: sample not recorded: {e}", self.tick_count);
                sink.emit(&AppEvent::ClockUnavailable(e));
                TickOutcome::Partial {
                    actuators: next,
                    cause: e.into(),
                }
            }
        };

        // 5. Panel shows the post-tick state every accepted tick
        hw.show_text(&self.render_display(now.ok()));
        outcome
    }

    // ── Report handling ───────────────────────────────────────

    /// Render the document `request` asks for, stamped with the clock's
    /// current time (or unsynced when it has none).
    pub fn handle_request(
        &self,
        request: ReportRequest,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<Report, RenderError> {
        let now = clock.now().ok();
        let report = match request {
            ReportRequest::StatusPage => Report::Status(self.render_status_document(now)?),
            ReportRequest::HistoryExport => Report::Export(self.render_export_document(now)?),
        };
        sink.emit(&AppEvent::ReportServed {
            request,
            bytes: report.body().len(),
            rows_omitted: report.rows_omitted(),
        });
        Ok(report)
    }

    pub fn render_status_document(
        &self,
        now: Option<NaiveDateTime>,
    ) -> Result<RenderedDocument<STATUS_DOC_CAPACITY>, RenderError> {
        self.with_context(now, report::render_status_document)
    }

    pub fn render_export_document(
        &self,
        now: Option<NaiveDateTime>,
    ) -> Result<RenderedDocument<EXPORT_DOC_CAPACITY>, RenderError> {
        self.with_context(now, report::render_export_document)
    }

    /// Text for the OLED panel.
    pub fn render_display(&self, now: Option<NaiveDateTime>) -> DisplayFrame {
        self.with_context(now, report::render_display)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            tick_count: self.tick_count,
            reading: self.last_reading,
            actuators: self.actuators,
            history_len: self.history.len(),
            history_capacity: self.history.capacity(),
        }
    }

    /// Last commanded actuator state.
    pub fn state(&self) -> ActuatorState {
        self.actuators
    }

    /// Latest accepted reading.
    pub fn last_reading(&self) -> Option<Reading> {
        self.last_reading
    }

    /// Copy of the filled history, newest first.
    pub fn history_snapshot(&self) -> HistorySnapshot {
        self.history.snapshot()
    }

    /// Grid last pushed to the indicator, before brightness scaling.
    pub fn indicator(&self) -> &IndicatorGrid {
        &self.indicator
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn with_context<R>(
        &self,
        now: Option<NaiveDateTime>,
        render: impl FnOnce(&ReportContext<'_>) -> R,
    ) -> R {
        let history = self.history.snapshot();
        let ctx = ReportContext {
            actuators: self.actuators,
            reading: self.last_reading,
            history: &history,
            now,
            refresh_secs: self.config.status_refresh_secs,
        };
        render(&ctx)
    }
}
