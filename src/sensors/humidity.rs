//! Analog relative-humidity sensor, linear 0-100 %RH over the ADC span.
//!
//! On ESP-IDF: ADC1 oneshot channel.  On host/test: static AtomicU16.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::drivers::hw_init;
use crate::error::SensorError;

#[cfg(not(target_os = "espidf"))]
static SIM_HUMIDITY_ADC: AtomicU16 = AtomicU16::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_humidity_adc(raw: u16) {
    SIM_HUMIDITY_ADC.store(raw, Ordering::Relaxed);
}

pub struct HumiditySensor {
    channel: u32,
}

impl HumiditySensor {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    /// Relative humidity in percent.
    pub fn read(&self) -> Result<f32, SensorError> {
        #[cfg(target_os = "espidf")]
        let raw = hw_init::adc1_read(self.channel)?;
        #[cfg(not(target_os = "espidf"))]
        let raw = {
            let _ = self.channel;
            SIM_HUMIDITY_ADC.load(Ordering::Relaxed)
        };
        Ok(hw_init::adc_to_percent(raw))
    }
}
