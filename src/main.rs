//! BarnClimate Firmware: Main Entry Point
//!
//! Hexagonal architecture: one control loop ticking the [`Controller`], an
//! HTTP server task rendering reports from the same controller.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogEventSink   SystemClock   Uptime  │
//! │  (Source+Actuator+        (EventSink)    (ClockPort)           │
//! │   Indicator+Display)                                           │
//! │  WifiAdapter              EspHttpServer (report routes)        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │         Controller (pure logic, Arc<Mutex<_>>)         │    │
//! │  │  thresholds · history · indicator · reports            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, ensure};
use esp_idf_hal::gpio::{AnyOutputPin, Output, OutputPin, Pin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sntp::EspSntp;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{error, info, warn};

use barnclimate::adapters::hardware::{HardwareAdapter, Relays};
use barnclimate::adapters::http;
use barnclimate::adapters::log_sink::LogEventSink;
use barnclimate::adapters::time::{SystemClock, Uptime};
use barnclimate::adapters::wifi::{ConnectivityPort, WifiAdapter};
use barnclimate::app::events::AppEvent;
use barnclimate::app::ports::EventSink;
use barnclimate::app::service::Controller;
use barnclimate::config::ControllerConfig;
use barnclimate::drivers::led_matrix::LedMatrix;
use barnclimate::drivers::oled::OledPanel;
use barnclimate::drivers::relay::RelayDriver;
use barnclimate::sensors::{HumiditySensor, LightSensor, SensorHub, TemperatureSensor};
use barnclimate::{drivers, pins};

/// Build-time JSON override of the default configuration.
const CONFIG_OVERRIDE: Option<&str> = option_env!("BARNCLIMATE_CONFIG");
const WIFI_SSID: Option<&str> = option_env!("WIFI_SSID");
const WIFI_PASSWORD: &str = match option_env!("WIFI_PASSWORD") {
    Some(p) => p,
    None => "",
};

/// Loop granularity for WiFi polling and schedule checks.
const LOOP_PERIOD: Duration = Duration::from_secs(1);

fn load_config() -> ControllerConfig {
    match CONFIG_OVERRIDE.map(ControllerConfig::from_json) {
        Some(Ok(cfg)) => {
            info!("Config: build-time override applied");
            cfg
        }
        Some(Err(e)) => {
            warn!("Config: override rejected ({e}), using defaults");
            ControllerConfig::default()
        }
        None => ControllerConfig::default(),
    }
}

/// Refuse to boot when a typed pin is not the one `pins` assigns.
fn check_pin(pin: &impl Pin, expected: i32, role: &str) -> Result<()> {
    ensure!(
        pin.pin() == expected,
        "{role} taken on GPIO{} but wired to GPIO{expected}",
        pin.pin()
    );
    Ok(())
}

fn relay(
    pin: AnyOutputPin,
    expected: i32,
    name: &'static str,
) -> Result<RelayDriver<PinDriver<'static, AnyOutputPin, Output>>> {
    check_pin(&pin, expected, name)?;
    Ok(RelayDriver::new(
        PinDriver::output(pin)?,
        name,
        pins::RELAYS_ACTIVE_LOW,
    ))
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  BarnClimate v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    drivers::hw_init::init_peripherals().context("ADC init")?;
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let config = load_config();

    // ── 3. Construct adapters ─────────────────────────────────
    let sensor_hub = SensorHub::new(
        TemperatureSensor::new(pins::TEMP_ADC_CHANNEL),
        HumiditySensor::new(pins::HUMIDITY_ADC_CHANNEL),
        LightSensor::new(pins::LIGHT_ADC_CHANNEL),
    );
    let io = peripherals.pins;
    let relays = Relays {
        lights: relay(io.gpio4.downgrade_output(), pins::LIGHTS_RELAY_GPIO, "lights")?,
        fan: relay(io.gpio5.downgrade_output(), pins::FAN_RELAY_GPIO, "fan")?,
        humidifier: relay(
            io.gpio6.downgrade_output(),
            pins::HUMIDIFIER_RELAY_GPIO,
            "humidifier",
        )?,
    };

    check_pin(&io.gpio7, pins::LED_MATRIX_GPIO, "LED matrix")?;
    let matrix = LedMatrix::new(peripherals.rmt.channel0, io.gpio7)?;

    check_pin(&io.gpio8, pins::OLED_SDA_GPIO, "OLED SDA")?;
    check_pin(&io.gpio9, pins::OLED_SCL_GPIO, "OLED SCL")?;
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        io.gpio8,
        io.gpio9,
        &I2cConfig::new().baudrate(400.kHz().into()),
    )?;
    let panel = OledPanel::new(i2c).context("OLED init")?;

    let mut hw = HardwareAdapter::new(sensor_hub, relays, matrix, panel);

    let clock = SystemClock::new(config.utc_offset_minutes);
    let uptime = Uptime::new();
    let mut log_sink = LogEventSink::new();

    // ── 4. Construct the controller ───────────────────────────
    let controller: http::SharedController = Arc::new(Mutex::new(
        Controller::new(config.clone()).context("controller")?,
    ));
    controller
        .lock()
        .map_err(|_| anyhow!("controller lock poisoned"))?
        .start(&mut hw, &mut log_sink);

    // ── 5. Network: WiFi, SNTP, HTTP ──────────────────────────
    let mut wifi = WifiAdapter::new(BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
        sysloop,
    )?);
    match WIFI_SSID {
        Some(ssid) => {
            wifi.set_credentials(ssid, WIFI_PASSWORD)?;
            if let Err(e) = wifi.connect(uptime.secs()) {
                warn!("WiFi: initial connect failed ({e}), retrying in background");
            }
        }
        None => warn!("WiFi: no credentials compiled in, reports unavailable"),
    }
    let _sntp = EspSntp::new_default()?;
    let _server = http::start_server(controller.clone(), clock)?;

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    let sampling_secs = u64::from(config.sampling_interval_secs);
    let telemetry_secs = u64::from(config.telemetry_interval_secs);
    let mut next_tick = 0;
    let mut next_telemetry = telemetry_secs;

    loop {
        let now = uptime.secs();

        if now >= next_tick {
            match controller.lock() {
                Ok(mut app) => {
                    app.tick(&mut hw, &clock, &mut log_sink);
                }
                Err(_) => error!("Controller lock poisoned, tick skipped"),
            }
            next_tick = now + sampling_secs;
        }

        if now >= next_telemetry {
            if let Ok(app) = controller.lock() {
                log_sink.emit(&AppEvent::Telemetry(app.build_telemetry()));
            }
            next_telemetry = now + telemetry_secs;
        }

        // WiFi reconnection poll (exponential backoff).
        wifi.poll(now);

        std::thread::sleep(LOOP_PERIOD);
    }
}
