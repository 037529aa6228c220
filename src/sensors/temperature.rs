//! LM35 analog temperature sensor (10 mV per degree Celsius).
//!
//! Output voltage is read via the ESP32 ADC and converted linearly.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::drivers::hw_init;
use crate::error::SensorError;

/// 25.0 C at 3.3 V / 12-bit.
#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(310);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temp_adc(raw: u16) {
    SIM_TEMP_ADC.store(raw, Ordering::Relaxed);
}

const MV_PER_CELSIUS: f32 = 10.0;

pub struct TemperatureSensor {
    channel: u32,
}

impl TemperatureSensor {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    /// Degrees Celsius.
    pub fn read(&self) -> Result<f32, SensorError> {
        let raw = self.read_adc()?;
        Ok(adc_to_celsius(raw))
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        let _ = self.channel;
        Ok(SIM_TEMP_ADC.load(Ordering::Relaxed))
    }
}

pub fn adc_to_celsius(raw: u16) -> f32 {
    hw_init::adc_to_millivolts(raw) / MV_PER_CELSIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_lm35_output() {
        assert!(adc_to_celsius(0).abs() < 0.01);
        // 310 counts ~ 249.8 mV
        assert!((adc_to_celsius(310) - 24.98).abs() < 0.05);
        assert!((adc_to_celsius(4095) - 330.0).abs() < 0.01);
    }
}
