//! System configuration parameters
//!
//! All tunable parameters for the BarnClimate controller.  Defaults are the
//! build-time values; a JSON override document can replace them at boot.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::control::threshold::Thresholds;
use crate::error::Error;
use crate::history::MAX_HISTORY_CAPACITY;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Thresholds ---
    /// Luminosity (%) below which the lights are switched on
    pub luminosity_max: f32,
    /// Temperature (Celsius) above which the fan is switched on
    pub temperature_fan_on: f32,
    /// Relative humidity (%) below which the humidifier is switched on
    pub humidity_min: f32,

    // --- History ---
    /// Number of samples retained in the rolling history
    pub history_capacity: usize,

    // --- Timing ---
    /// Sampling tick interval (seconds)
    pub sampling_interval_secs: u32,
    /// Auto-refresh period of the status page (seconds)
    pub status_refresh_secs: u16,
    /// Telemetry log interval (seconds)
    pub telemetry_interval_secs: u32,
    /// Offset applied to the UTC wall clock (minutes)
    pub utc_offset_minutes: i16,

    // --- Indicator ---
    /// LED matrix brightness (1-100%)
    pub indicator_brightness: u8,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            luminosity_max: 30.0,
            temperature_fan_on: 28.0,
            humidity_min: 45.0,

            // History
            history_capacity: 10,

            // Timing
            sampling_interval_secs: 300, // 5 min
            status_refresh_secs: 30,
            telemetry_interval_secs: 60,
            utc_offset_minutes: -180, // UTC-3

            // Indicator
            indicator_brightness: 20,
        }
    }
}

impl ControllerConfig {
    /// Threshold triple consumed by the controller.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            luminosity_max: self.luminosity_max,
            temperature_fan_on: self.temperature_fan_on,
            humidity_min: self.humidity_min,
        }
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.luminosity_max.is_finite() || !(0.0..=100.0).contains(&self.luminosity_max) {
            return Err(ConfigError::ValidationFailed("luminosity_max must be within 0-100 %"));
        }
        if !self.temperature_fan_on.is_finite()
            || !(-40.0..=85.0).contains(&self.temperature_fan_on)
        {
            return Err(ConfigError::ValidationFailed(
                "temperature_fan_on must be within -40-85 C",
            ));
        }
        if !self.humidity_min.is_finite() || !(0.0..=100.0).contains(&self.humidity_min) {
            return Err(ConfigError::ValidationFailed("humidity_min must be within 0-100 %"));
        }
        if self.history_capacity == 0 || self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(ConfigError::ValidationFailed(
                "history_capacity must be within 1-MAX_HISTORY_CAPACITY",
            ));
        }
        if self.sampling_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed("sampling_interval_secs must be > 0"));
        }
        if self.status_refresh_secs == 0 {
            return Err(ConfigError::ValidationFailed("status_refresh_secs must be > 0"));
        }
        if self.telemetry_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed("telemetry_interval_secs must be > 0"));
        }
        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err(ConfigError::ValidationFailed("utc_offset_minutes beyond +/-14 h"));
        }
        if self.indicator_brightness == 0 || self.indicator_brightness > 100 {
            return Err(ConfigError::ValidationFailed("indicator_brightness must be within 1-100 %"));
        }
        Ok(())
    }

    /// Parse a JSON override document.  Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }
}

// ───────────────────────────────────────────────────────────────
// Error type
// ───────────────────────────────────────────────────────────────

/// Errors from loading or validating a [`ControllerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Override document is not valid JSON for this schema.
    Malformed,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "config document malformed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Malformed => Self::Config("malformed document"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
