//! Relay output driver (opto-isolated relay module, one GPIO per channel).
//!
//! Generic over any `embedded_hal` 1.0 [`OutputPin`], so the same driver runs
//! on an `esp_idf_hal::gpio::PinDriver` on the device and on [`SimPin`] in
//! host tests.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the pin is a real `PinDriver` taken in `main`.
//! On host/test: [`SimPin`] records the level and the number of writes.

use embedded_hal::digital::OutputPin;
use log::info;

/// One relay channel.
pub struct RelayDriver<P> {
    pin: P,
    name: &'static str,
    active_low: bool,
    /// Last commanded coil state; `None` until the first write.
    energised: Option<bool>,
}

impl<P: OutputPin> RelayDriver<P> {
    pub fn new(pin: P, name: &'static str, active_low: bool) -> Self {
        Self {
            pin,
            name,
            active_low,
            energised: None,
        }
    }

    /// Energise (`true`) or release the coil.
    ///
    /// Idempotent: a repeated command does not touch the pin.  Returns
    /// whether the pin was written.
    pub fn set(&mut self, on: bool) -> Result<bool, P::Error> {
        if self.energised == Some(on) {
            return Ok(false);
        }
        if on != self.active_low {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.energised = Some(on);
        info!("RELAY | {} -> {}", self.name, if on { "ON" } else { "OFF" });
        Ok(true)
    }

    pub fn is_on(&self) -> bool {
        self.energised == Some(true)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

// ── Host simulation pin ───────────────────────────────────────

/// In-memory output pin for host builds.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimPin {
    pub high: bool,
    pub writes: u32,
}

#[cfg(not(target_os = "espidf"))]
impl embedded_hal::digital::ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

#[cfg(not(target_os = "espidf"))]
impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}
