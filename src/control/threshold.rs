//! Single-threshold actuator rules.
//!
//! Each actuator is driven by exactly one strict comparison against a fixed
//! threshold.  There is no dead-band: a reading hovering on a threshold can
//! toggle its actuator on consecutive ticks.  Ties always resolve to "off".
//!
//! | Actuator   | On when                                 |
//! |------------|-----------------------------------------|
//! | fan        | `temperature > temperature_fan_on`      |
//! | humidifier | `humidity < humidity_min`               |
//! | lights     | `luminosity < luminosity_max`           |

use serde::{Deserialize, Serialize};

use crate::sensors::Reading;

/// Fixed comparison points for the three actuator rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Lights stay off at or above this luminosity (%).
    pub luminosity_max: f32,
    /// Fan runs strictly above this temperature (Celsius).
    pub temperature_fan_on: f32,
    /// Humidifier runs strictly below this relative humidity (%).
    pub humidity_min: f32,
}

/// Commanded state of the three relay-driven actuators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActuatorState {
    pub lights: bool,
    pub fan: bool,
    pub humidifier: bool,
}

impl ActuatorState {
    /// All actuators off: safe default before the first accepted reading.
    pub const ALL_OFF: Self = Self {
        lights: false,
        fan: false,
        humidifier: false,
    };

    /// Number of actuators currently commanded on.
    pub fn active_count(&self) -> u8 {
        u8::from(self.lights) + u8::from(self.fan) + u8::from(self.humidifier)
    }
}

/// Derive the actuator state for `reading`.
pub fn evaluate(reading: Reading, thresholds: Thresholds) -> ActuatorState {
    ActuatorState {
        lights: reading.luminosity < thresholds.luminosity_max,
        fan: reading.temperature > thresholds.temperature_fan_on,
        humidifier: reading.humidity < thresholds.humidity_min,
    }
}
