//! LDR light sensor in a voltage divider (brighter = higher voltage).
//!
//! Reports luminosity as a percentage of the ADC span; the controller
//! thresholds are expressed in the same unit.
//!
//! On ESP-IDF: ADC1 oneshot channel.  On host/test: static AtomicU16.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::drivers::hw_init;
use crate::error::SensorError;

#[cfg(not(target_os = "espidf"))]
static SIM_LIGHT_ADC: AtomicU16 = AtomicU16::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_light_adc(raw: u16) {
    SIM_LIGHT_ADC.store(raw, Ordering::Relaxed);
}

pub struct LightSensor {
    channel: u32,
}

impl LightSensor {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    /// Luminosity in percent of full scale.
    pub fn read(&self) -> Result<f32, SensorError> {
        #[cfg(target_os = "espidf")]
        let raw = hw_init::adc1_read(self.channel)?;
        #[cfg(not(target_os = "espidf"))]
        let raw = {
            let _ = self.channel;
            SIM_LIGHT_ADC.load(Ordering::Relaxed)
        };
        Ok(hw_init::adc_to_percent(raw))
    }
}
