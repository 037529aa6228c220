//! Integration tests for the host hardware path: simulated ADC counts →
//! SensorHub → HardwareAdapter → Controller::tick → relays, matrix, panel.

use super::mock_hw::{MockClock, RecordingSink, base_time, shelter_config};

use barnclimate::adapters::hardware::{HardwareAdapter, Relays};
use barnclimate::app::service::{Controller, TickOutcome};
use barnclimate::control::threshold::ActuatorState;
use barnclimate::drivers::led_matrix::{LedMatrix, encode_frame};
use barnclimate::drivers::oled::OledPanel;
use barnclimate::drivers::relay::{RelayDriver, SimPin};
use barnclimate::indicator;
use barnclimate::sensors::humidity::sim_set_humidity_adc;
use barnclimate::sensors::light::sim_set_light_adc;
use barnclimate::sensors::temperature::sim_set_temp_adc;
use barnclimate::sensors::{HumiditySensor, LightSensor, SensorHub, TemperatureSensor};

fn sim_adapter() -> HardwareAdapter<SimPin> {
    let hub = SensorHub::new(
        TemperatureSensor::new(0),
        HumiditySensor::new(1),
        LightSensor::new(2),
    );
    let relays = Relays {
        lights: RelayDriver::new(SimPin::default(), "lights", true),
        fan: RelayDriver::new(SimPin::default(), "fan", true),
        humidifier: RelayDriver::new(SimPin::default(), "humidifier", true),
    };
    HardwareAdapter::new(hub, relays, LedMatrix::new(), OledPanel::new())
}

// The sim ADC channels are process-wide, so every scenario that sets them
// lives in this one test.
#[test]
fn adc_counts_drive_relays_and_panel() {
    let (mut app, mut sink) = (
        Controller::new(shelter_config()).expect("valid config"),
        RecordingSink::new(),
    );
    let mut hw = sim_adapter();
    let clock = MockClock::fixed(base_time());
    app.start(&mut hw, &mut sink);

    // Warm and dry barn in daylight: ~30 C, 40 %, 50 % light.
    sim_set_temp_adc(372);
    sim_set_humidity_adc(1638);
    sim_set_light_adc(2048);
    let warm = ActuatorState {
        lights: false,
        fan: true,
        humidifier: true,
    };

    assert_eq!(app.tick(&mut hw, &clock, &mut sink), TickOutcome::Recorded(warm));
    assert_eq!(hw.relays().state(), warm);
    // Active-low relay board.
    assert!(!hw.relays().fan.pin().high);
    assert!(hw.relays().lights.pin().high);
    assert_eq!(hw.matrix().frame(), &encode_frame(&indicator::map(&warm)));
    assert_eq!(hw.panel().frame().line(0), "Shelter  00:00:00");
    assert_eq!(hw.panel().frame().line(1), "T 30.0C  H 40.0%");
    assert_eq!(hw.panel().frame().line(2), "Light 50.0%");

    let recorded = app.history_snapshot();
    assert!((recorded[0].temperature - 29.98).abs() < 0.05);

    // Cool, humid night: ~20 C, 60 %, 10 % light.
    sim_set_temp_adc(248);
    sim_set_humidity_adc(2457);
    sim_set_light_adc(409);
    let night = ActuatorState {
        lights: true,
        fan: false,
        humidifier: false,
    };

    assert_eq!(app.tick(&mut hw, &clock, &mut sink), TickOutcome::Recorded(night));
    assert_eq!(hw.relays().state(), night);
    assert!(!hw.relays().lights.pin().high);
    assert!(hw.relays().fan.pin().high);
    assert_eq!(hw.panel().frame().line(1), "T 20.0C  H 60.0%");
    assert_eq!(hw.panel().frame().line(2), "Light 10.0%");
    assert_eq!(hw.panel().frame().line(3), "Lights  ON");
    assert_eq!(app.history_snapshot().len(), 2);
}
