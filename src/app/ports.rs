//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (sensors, relays, LED matrix, OLED panel, clock, event sinks)
//! implement these traits.  The [`Controller`](super::service::Controller)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  All port errors are typed: callers must handle every variant
//! explicitly.

use chrono::NaiveDateTime;

use crate::control::threshold::ActuatorState;
use crate::error::{ClockError, SensorError};
use crate::indicator::IndicatorGrid;
use crate::report::DisplayFrame;
use crate::sensors::Reading;

// ───────────────────────────────────────────────────────────────
// Source port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
pub trait SourcePort {
    /// Read temperature, humidity and luminosity together.
    ///
    /// Implementations may return raw values; the controller sanitises
    /// them before evaluation.
    fn read(&mut self) -> Result<Reading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: RTC / SNTP → domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock source used to stamp history entries and reports.
pub trait ClockPort {
    /// Current local wall-clock time.
    fn now(&self) -> Result<NaiveDateTime, ClockError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → relays)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this with the full desired state.
pub trait ActuatorPort {
    /// Drive every relay to match `state`.  Must be idempotent.
    fn apply(&mut self, state: ActuatorState);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → LED matrix)
// ───────────────────────────────────────────────────────────────

pub trait IndicatorPort {
    /// Display `grid` on the matrix.
    fn show(&mut self, grid: &IndicatorGrid);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → OLED panel)
// ───────────────────────────────────────────────────────────────

/// Text panel next to the matrix.  Receives a complete frame every
/// accepted tick.
pub trait DisplayPort {
    fn show_text(&mut self, frame: &DisplayFrame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, HTTP
/// push, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
