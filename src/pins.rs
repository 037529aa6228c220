//! GPIO / peripheral pin assignments for the BarnClimate controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  `main` checks every typed `esp-idf-hal` pin it
//! takes against the numbers below and refuses to boot on a mismatch.

// ---------------------------------------------------------------------------
// Relay outputs (opto-isolated relay module, active LOW)
// ---------------------------------------------------------------------------

/// Lighting circuit relay.
pub const LIGHTS_RELAY_GPIO: i32 = 4;
/// Ventilation fan relay.
pub const FAN_RELAY_GPIO: i32 = 5;
/// Humidifier relay.
pub const HUMIDIFIER_RELAY_GPIO: i32 = 6;
/// The relay board energises a coil when its input is pulled LOW.
pub const RELAYS_ACTIVE_LOW: bool = true;

// ---------------------------------------------------------------------------
// Sensors: Analog (ADC1)
// ---------------------------------------------------------------------------

/// LM35 temperature sensor: ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const TEMP_ADC_CHANNEL: u32 = 0;
/// Analog humidity sensor: ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const HUMIDITY_ADC_CHANNEL: u32 = 1;
/// LDR divider: ADC1 channel 2 (GPIO 3 on ESP32-S3).
pub const LIGHT_ADC_CHANNEL: u32 = 2;

// ---------------------------------------------------------------------------
// 5x5 WS2812B indicator matrix
// ---------------------------------------------------------------------------

/// Data-in of the first pixel, driven by RMT channel 0.
pub const LED_MATRIX_GPIO: i32 = 7;


// ---------------------------------------------------------------------------
// SSD1306 OLED status panel (I2C0, 400 kHz)
// ---------------------------------------------------------------------------

pub const OLED_SDA_GPIO: i32 = 8;
pub const OLED_SCL_GPIO: i32 = 9;
