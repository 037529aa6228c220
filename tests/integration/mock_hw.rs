//! Mock adapters for integration tests.
//!
//! Records every actuator, indicator and panel call so tests can assert on
//! the full command history without touching real GPIO, RMT or I2C
//! peripherals.

use std::cell::Cell;
use std::collections::VecDeque;

use barnclimate::app::events::AppEvent;
use barnclimate::app::ports::{
    ActuatorPort, ClockPort, DisplayPort, EventSink, IndicatorPort, SourcePort,
};
use barnclimate::config::ControllerConfig;
use barnclimate::control::threshold::ActuatorState;
use barnclimate::error::{ClockError, SensorError};
use barnclimate::indicator::IndicatorGrid;
use barnclimate::report::DisplayFrame;
use barnclimate::sensors::Reading;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

// ── Port call record ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PortCall {
    Apply(ActuatorState),
    Show(IndicatorGrid),
    Text(DisplayFrame),
}

// ── MockHardware ──────────────────────────────────────────────

/// Source + actuator + indicator + panel mock.  Queued readings are served first;
/// once the queue is empty `steady` is returned on every read.
pub struct MockHardware {
    pub queued: VecDeque<Result<Reading, SensorError>>,
    pub steady: Reading,
    pub calls: Vec<PortCall>,
    pub reads: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(steady: Reading) -> Self {
        Self {
            queued: VecDeque::new(),
            steady,
            calls: Vec::new(),
            reads: 0,
        }
    }

    pub fn queue(&mut self, reading: Result<Reading, SensorError>) -> &mut Self {
        self.queued.push_back(reading);
        self
    }

    pub fn applied(&self) -> Vec<ActuatorState> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PortCall::Apply(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn shown(&self) -> Vec<IndicatorGrid> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PortCall::Show(grid) => Some(*grid),
                _ => None,
            })
            .collect()
    }

    pub fn displayed(&self) -> Vec<DisplayFrame> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PortCall::Text(frame) => Some(frame.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_applied(&self) -> Option<ActuatorState> {
        self.applied().last().copied()
    }
}

impl SourcePort for MockHardware {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.reads += 1;
        self.queued.pop_front().unwrap_or(Ok(self.steady))
    }
}

impl ActuatorPort for MockHardware {
    fn apply(&mut self, state: ActuatorState) {
        self.calls.push(PortCall::Apply(state));
    }
}

impl IndicatorPort for MockHardware {
    fn show(&mut self, grid: &IndicatorGrid) {
        self.calls.push(PortCall::Show(*grid));
    }
}

impl DisplayPort for MockHardware {
    fn show_text(&mut self, frame: &DisplayFrame) {
        self.calls.push(PortCall::Text(frame.clone()));
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Clock that advances by `step` on every query, or fails with `error`.
pub struct MockClock {
    pub next: Cell<NaiveDateTime>,
    pub step: TimeDelta,
    pub error: Cell<Option<ClockError>>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn stepping(start: NaiveDateTime, step: TimeDelta) -> Self {
        Self {
            next: Cell::new(start),
            step,
            error: Cell::new(None),
        }
    }

    pub fn fixed(at: NaiveDateTime) -> Self {
        Self::stepping(at, TimeDelta::zero())
    }

    pub fn failing(error: ClockError) -> Self {
        let clock = Self::fixed(base_time());
        clock.error.set(Some(error));
        clock
    }
}

impl ClockPort for MockClock {
    fn now(&self) -> Result<NaiveDateTime, ClockError> {
        if let Some(e) = self.error.get() {
            return Err(e);
        }
        let now = self.next.get();
        self.next.set(now + self.step);
        Ok(now)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Fixtures ──────────────────────────────────────────────────

/// 2026-10-18 00:00:00 local time.
pub fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[allow(dead_code)]
pub fn reading(temperature: f32, humidity: f32, luminosity: f32) -> Reading {
    Reading {
        temperature,
        humidity,
        luminosity,
    }
}

/// Thresholds 40 % / 28 C / 45 %, everything else default.
#[allow(dead_code)]
pub fn shelter_config() -> ControllerConfig {
    ControllerConfig {
        luminosity_max: 40.0,
        temperature_fan_on: 28.0,
        humidity_min: 45.0,
        ..ControllerConfig::default()
    }
}
