//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`Reading`] each
//! sampling tick.  Readings are sanitised before they reach the controller:
//! non-finite channels reject the whole reading, finite values are clamped
//! into the physically plausible range of the shelter.

pub mod humidity;
pub mod light;
pub mod temperature;

use serde::{Deserialize, Serialize};

use crate::error::SensorError;
pub use humidity::HumiditySensor;
pub use light::LightSensor;
pub use temperature::TemperatureSensor;

/// Plausible temperature range (Celsius).
pub const TEMPERATURE_RANGE: (f32, f32) = (-40.0, 85.0);
/// Plausible relative humidity range (%).
pub const HUMIDITY_RANGE: (f32, f32) = (0.0, 100.0);
/// Plausible luminosity range (% of full scale).
pub const LUMINOSITY_RANGE: (f32, f32) = (0.0, 100.0);

/// A point-in-time snapshot of the shelter environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Air temperature (Celsius).
    pub temperature: f32,
    /// Relative humidity (%).
    pub humidity: f32,
    /// Ambient light (% of full scale).
    pub luminosity: f32,
}

impl Reading {
    /// Reject NaN/infinite channels and clamp the rest into range.
    pub fn sanitize(self) -> Result<Self, SensorError> {
        if !(self.temperature.is_finite() && self.humidity.is_finite() && self.luminosity.is_finite())
        {
            return Err(SensorError::NotFinite);
        }
        Ok(Self {
            temperature: self.temperature.clamp(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1),
            humidity: self.humidity.clamp(HUMIDITY_RANGE.0, HUMIDITY_RANGE.1),
            luminosity: self.luminosity.clamp(LUMINOSITY_RANGE.0, LUMINOSITY_RANGE.1),
        })
    }
}

/// Aggregates all sensor drivers and produces a unified reading.
pub struct SensorHub {
    pub temperature: TemperatureSensor,
    pub humidity: HumiditySensor,
    pub light: LightSensor,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(
        temperature: TemperatureSensor,
        humidity: HumiditySensor,
        light: LightSensor,
    ) -> Self {
        Self {
            temperature,
            humidity,
            light,
        }
    }

    /// Read every channel.  Any channel failure fails the whole reading;
    /// the controller then keeps its previous actuator state.
    pub fn read_all(&mut self) -> Result<Reading, SensorError> {
        Ok(Reading {
            temperature: self.temperature.read()?,
            humidity: self.humidity.read()?,
            luminosity: self.light.read()?,
        })
    }
}
