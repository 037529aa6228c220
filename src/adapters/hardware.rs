//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`], the three relay drivers, the LED matrix and the
//! OLED panel, exposing them through [`SourcePort`], [`ActuatorPort`],
//! [`IndicatorPort`] and [`DisplayPort`].  This is the only module in the system that touches
//! actual hardware.  On non-espidf targets, the underlying drivers use
//! cfg-gated simulation stubs.

use embedded_hal::digital::OutputPin;
use log::error;

use crate::app::ports::{ActuatorPort, DisplayPort, IndicatorPort, SourcePort};
use crate::control::threshold::ActuatorState;
use crate::drivers::led_matrix::LedMatrix;
use crate::drivers::oled::OledPanel;
use crate::drivers::relay::RelayDriver;
use crate::error::SensorError;
use crate::indicator::IndicatorGrid;
use crate::report::DisplayFrame;
use crate::sensors::{Reading, SensorHub};

/// The three actuator relays, one pin type for all.
pub struct Relays<P> {
    pub lights: RelayDriver<P>,
    pub fan: RelayDriver<P>,
    pub humidifier: RelayDriver<P>,
}

impl<P: OutputPin> Relays<P> {
    /// Current coil states.
    pub fn state(&self) -> ActuatorState {
        ActuatorState {
            lights: self.lights.is_on(),
            fan: self.fan.is_on(),
            humidifier: self.humidifier.is_on(),
        }
    }
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P> {
    sensor_hub: SensorHub,
    relays: Relays<P>,
    matrix: LedMatrix,
    panel: OledPanel,
}

impl<P: OutputPin> HardwareAdapter<P> {
    pub fn new(
        sensor_hub: SensorHub,
        relays: Relays<P>,
        matrix: LedMatrix,
        panel: OledPanel,
    ) -> Self {
        Self {
            sensor_hub,
            relays,
            matrix,
            panel,
        }
    }

    pub fn relays(&self) -> &Relays<P> {
        &self.relays
    }

    pub fn matrix(&self) -> &LedMatrix {
        &self.matrix
    }

    pub fn panel(&self) -> &OledPanel {
        &self.panel
    }
}

// ── SourcePort implementation ─────────────────────────────────

impl<P: OutputPin> SourcePort for HardwareAdapter<P> {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin> ActuatorPort for HardwareAdapter<P> {
    fn apply(&mut self, state: ActuatorState) {
        let relays = [
            (&mut self.relays.lights, state.lights),
            (&mut self.relays.fan, state.fan),
            (&mut self.relays.humidifier, state.humidifier),
        ];
        for (relay, on) in relays {
            if let Err(e) = relay.set(on) {
                error!("RELAY | {} write failed: {e:?}", relay.name());
            }
        }
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<P: OutputPin> IndicatorPort for HardwareAdapter<P> {
    fn show(&mut self, grid: &IndicatorGrid) {
        self.matrix.show(grid);
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl<P: OutputPin> DisplayPort for HardwareAdapter<P> {
    fn show_text(&mut self, frame: &DisplayFrame) {
        self.panel.show(frame);
    }
}
