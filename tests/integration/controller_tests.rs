//! Integration tests for the Controller tick pipeline:
//! source → sanitise → evaluate → actuators → indicator → history → panel.

use super::mock_hw::{
    MockClock, MockHardware, PortCall, RecordingSink, base_time, reading, shelter_config,
};

use barnclimate::app::events::AppEvent;
use barnclimate::app::service::{Controller, TickOutcome};
use barnclimate::config::ControllerConfig;
use barnclimate::control::threshold::ActuatorState;
use barnclimate::error::{ClockError, Error, SensorError};
use barnclimate::indicator::{self, IndicatorGrid};
use chrono::TimeDelta;

const FAN_AND_HUMIDIFIER: ActuatorState = ActuatorState {
    lights: false,
    fan: true,
    humidifier: true,
};

fn make_controller(config: ControllerConfig) -> (Controller, RecordingSink) {
    let app = Controller::new(config).expect("valid config");
    (app, RecordingSink::new())
}

fn five_minute_clock() -> MockClock {
    MockClock::stepping(base_time(), TimeDelta::minutes(5))
}

// ── Round trip: reading → decision → history → export ────────

#[test]
fn round_trip_scenario() {
    let (mut app, mut sink) = make_controller(shelter_config());
    let mut hw = MockHardware::new(reading(30.0, 40.0, 50.0));
    let clock = five_minute_clock();

    let outcome = app.tick(&mut hw, &clock, &mut sink);

    assert_eq!(outcome, TickOutcome::Recorded(FAN_AND_HUMIDIFIER));
    assert_eq!(app.state(), FAN_AND_HUMIDIFIER);
    assert_eq!(hw.last_applied(), Some(FAN_AND_HUMIDIFIER));

    let history = app.history_snapshot();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].timestamp, base_time());

    let csv = app.render_export_document(Some(base_time())).unwrap();
    let rows: Vec<&str> = csv.as_str().lines().skip(3).collect();
    assert_eq!(rows, ["2026-10-18 00:00:00,30.0,40.0"]);
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_drives_safe_state() {
    let (mut app, mut sink) = make_controller(ControllerConfig::default());
    let mut hw = MockHardware::new(reading(20.0, 50.0, 50.0));

    app.start(&mut hw, &mut sink);

    assert_eq!(
        hw.calls[..2],
        [
            PortCall::Apply(ActuatorState::ALL_OFF),
            PortCall::Show(IndicatorGrid::default()),
        ]
    );
    // Panel comes up with placeholders before the first reading.
    let panel = hw.displayed();
    assert_eq!(panel.len(), 1);
    assert_eq!(panel[0].line(0), "Shelter  --:--:--");
    assert_eq!(panel[0].line(1), "T --C  H --%");
    assert_eq!(panel[0].line(4), "Fan     OFF");
    assert_eq!(
        sink.events,
        [AppEvent::Started {
            history_capacity: 10
        }]
    );
    assert_eq!(hw.reads, 0);
}

// ── Failure paths ─────────────────────────────────────────────

#[test]
fn sensor_failure_keeps_previous_state() {
    let (mut app, mut sink) = make_controller(shelter_config());
    let mut hw = MockHardware::new(reading(30.0, 40.0, 50.0));
    let clock = five_minute_clock();

    app.tick(&mut hw, &clock, &mut sink);
    let calls_before = hw.calls.len();

    hw.queue(Err(SensorError::AdcReadFailed));
    let outcome = app.tick(&mut hw, &clock, &mut sink);

    assert_eq!(
        outcome,
        TickOutcome::Skipped(Error::Sensor(SensorError::AdcReadFailed))
    );
    assert_eq!(app.state(), FAN_AND_HUMIDIFIER);
    assert_eq!(hw.calls.len(), calls_before, "no port writes on a skipped tick");
    assert_eq!(app.history_snapshot().len(), 1);
    assert!(
        sink.events
            .contains(&AppEvent::ReadingRejected(SensorError::AdcReadFailed))
    );
}

#[test]
fn non_finite_reading_is_rejected() {
    let (mut app, mut sink) = make_controller(shelter_config());
    let mut hw = MockHardware::new(reading(20.0, 50.0, 50.0));
    hw.queue(Ok(reading(f32::NAN, 40.0, 50.0)));

    let outcome = app.tick(&mut hw, &five_minute_clock(), &mut sink);

    assert_eq!(
        outcome,
        TickOutcome::Skipped(Error::Sensor(SensorError::NotFinite))
    );
    assert!(hw.applied().is_empty());
    assert!(app.last_reading().is_none());
}

#[test]
fn clock_failure_applies_but_does_not_record() {
    let (mut app, mut sink) = make_controller(shelter_config());
    let mut hw = MockHardware::new(reading(30.0, 40.0, 50.0));
    let clock = MockClock::failing(ClockError::NotSynced);

    let outcome = app.tick(&mut hw, &clock, &mut sink);

    assert_eq!(
        outcome,
        TickOutcome::Partial {
            actuators: FAN_AND_HUMIDIFIER,
            cause: Error::Clock(ClockError::NotSynced),
        }
    );
    assert_eq!(hw.last_applied(), Some(FAN_AND_HUMIDIFIER));
    assert!(app.history_snapshot().is_empty());
    assert!(
        sink.events
            .contains(&AppEvent::ClockUnavailable(ClockError::NotSynced))
    );
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::SampleRecorded(_))),
        0
    );
}

// ── Sanitising ────────────────────────────────────────────────

#[test]
fn out_of_range_values_are_clamped_before_recording() {
    let (mut app, mut sink) = make_controller(shelter_config());
    let mut hw = MockHardware::new(reading(200.0, -5.0, 150.0));

    app.tick(&mut hw, &five_minute_clock(), &mut sink);

    let entry = app.history_snapshot()[0];
    assert!((entry.temperature - 85.0).abs() < f32::EPSILON);
    assert!(entry.humidity.abs() < f32::EPSILON);
    assert_eq!(
        app.state(),
        ActuatorState {
            lights: false,
            fan: true,
            humidifier: true,
        }
    );
}

// ── Events and indicator ──────────────────────────────────────

#[test]
fn actuator_change_events_only_on_change() {
    let (mut app, mut sink) = make_controller(shelter_config());
    let mut hw = MockHardware::new(reading(30.0, 40.0, 50.0));
    let clock = five_minute_clock();

    app.tick(&mut hw, &clock, &mut sink);
    app.tick(&mut hw, &clock, &mut sink);
    hw.queue(Ok(reading(20.0, 60.0, 10.0)));
    app.tick(&mut hw, &clock, &mut sink);

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ActuatorsChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        [
            (ActuatorState::ALL_OFF, FAN_AND_HUMIDIFIER),
            (
                FAN_AND_HUMIDIFIER,
                ActuatorState {
                    lights: true,
                    fan: false,
                    humidifier: false,
                }
            ),
        ]
    );
    // Relays are commanded every tick; the driver filters repeats.
    assert_eq!(hw.applied().len(), 3);
}

#[test]
fn indicator_pushed_once_per_change_and_dimmed() {
    let config = shelter_config();
    let brightness = config.indicator_brightness;
    let (mut app, mut sink) = make_controller(config);
    let mut hw = MockHardware::new(reading(30.0, 40.0, 50.0));
    let clock = five_minute_clock();

    app.tick(&mut hw, &clock, &mut sink);
    app.tick(&mut hw, &clock, &mut sink);

    let expected = indicator::map(&FAN_AND_HUMIDIFIER);
    assert_eq!(hw.shown(), [expected.scaled(brightness)]);
    assert_eq!(app.indicator(), &expected);
}

#[test]
fn indicator_follows_state_after_start() {
    let (mut app, mut sink) = make_controller(shelter_config());
    let mut hw = MockHardware::new(reading(20.0, 50.0, 50.0));
    let clock = five_minute_clock();

    app.start(&mut hw, &mut sink);
    // Everything off: the grid is unchanged, nothing new is pushed.
    app.tick(&mut hw, &clock, &mut sink);
    assert_eq!(hw.shown().len(), 1);

    hw.queue(Ok(reading(35.0, 50.0, 50.0)));
    app.tick(&mut hw, &clock, &mut sink);
    assert_eq!(hw.shown().len(), 2);
    assert_eq!(
        app.indicator(),
        &indicator::map(&ActuatorState {
            fan: true,
            ..ActuatorState::ALL_OFF
        })
    );
}

// ── OLED panel ────────────────────────────────────────────────

#[test]
fn panel_pushed_every_accepted_tick() {
    let (mut app, mut sink) = make_controller(shelter_config());
    let mut hw = MockHardware::new(reading(30.0, 40.0, 50.0));
    let clock = five_minute_clock();

    app.tick(&mut hw, &clock, &mut sink);
    app.tick(&mut hw, &clock, &mut sink);
    hw.queue(Err(SensorError::AdcReadFailed));
    app.tick(&mut hw, &clock, &mut sink);

    let panel = hw.displayed();
    assert_eq!(panel.len(), 2, "skipped tick leaves the panel alone");
    assert_eq!(panel[0].line(0), "Shelter  00:00:00");
    assert_eq!(panel[1].line(0), "Shelter  00:05:00");
    assert_eq!(panel[1].line(1), "T 30.0C  H 40.0%");
    assert_eq!(panel[1].line(4), "Fan     ON");
    assert_eq!(panel[1], app.render_display(Some(base_time() + TimeDelta::minutes(5))));
}

#[test]
fn panel_shows_state_without_clock() {
    let (mut app, mut sink) = make_controller(shelter_config());
    let mut hw = MockHardware::new(reading(30.0, 40.0, 50.0));

    app.tick(&mut hw, &MockClock::failing(ClockError::Unavailable), &mut sink);

    let panel = hw.displayed();
    assert_eq!(panel.len(), 1);
    assert_eq!(panel[0].line(0), "Shelter  --:--:--");
    assert_eq!(panel[0].line(5), "Humid.  ON");
}

// ── History through the controller ────────────────────────────

#[test]
fn history_evicts_after_capacity_plus_one() {
    let config = ControllerConfig {
        history_capacity: 3,
        ..shelter_config()
    };
    let (mut app, mut sink) = make_controller(config);
    let mut hw = MockHardware::new(reading(20.0, 50.0, 50.0));
    let clock = five_minute_clock();

    for n in 0..4 {
        hw.queue(Ok(reading(20.0 + n as f32, 50.0, 50.0)));
        app.tick(&mut hw, &clock, &mut sink);
    }

    let history = app.history_snapshot();
    assert_eq!(history.len(), 3);
    let temps: Vec<f32> = history.iter().map(|e| e.temperature).collect();
    assert_eq!(temps, [23.0, 22.0, 21.0]);
    assert_eq!(history[0].timestamp, base_time() + TimeDelta::minutes(15));
}

#[test]
fn telemetry_reflects_ticks() {
    let (mut app, mut sink) = make_controller(shelter_config());
    let mut hw = MockHardware::new(reading(30.0, 40.0, 50.0));
    let clock = five_minute_clock();

    app.tick(&mut hw, &clock, &mut sink);
    hw.queue(Err(SensorError::AdcReadFailed));
    app.tick(&mut hw, &clock, &mut sink);

    let t = app.build_telemetry();
    assert_eq!(t.tick_count, 2);
    assert_eq!(t.reading, Some(reading(30.0, 40.0, 50.0)));
    assert_eq!(t.actuators, FAN_AND_HUMIDIFIER);
    assert_eq!(t.history_len, 1);
    assert_eq!(t.history_capacity, 10);
}
