//! Actuator indicator mapping for the 5x5 RGB LED matrix.
//!
//! Each matrix row is bound to one meaning by [`ROW_ROLES`]; a row lights up
//! uniformly in its actuator's colour while that actuator is commanded on,
//! and is dark otherwise.  The mapping is a pure function of
//! [`ActuatorState`], so the matrix can never disagree with the relay
//! commands issued in the same tick.
//!
//! | Row | Role        | Colour  |
//! |-----|-------------|---------|
//! | 0   | Fan         | white   |
//! | 1   | Humidifier  | violet  |
//! | 2   | Lights      | amber   |
//! | 3   | reserved    | off     |
//! | 4   | reserved    | off     |

use crate::control::threshold::ActuatorState;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// Matrix edge length.
pub const GRID_SIZE: usize = 5;

pub const COLOUR_OFF: Rgb = (0, 0, 0);
pub const COLOUR_FAN: Rgb = (255, 255, 255); // White
pub const COLOUR_HUMIDIFIER: Rgb = (148, 0, 211); // Violet
pub const COLOUR_LIGHTS: Rgb = (255, 176, 0); // Amber

/// What a matrix row reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    Fan,
    Humidifier,
    Lights,
    Reserved,
}

impl RowRole {
    /// Colour shown while the role's actuator is on.
    pub const fn colour(self) -> Rgb {
        match self {
            Self::Fan => COLOUR_FAN,
            Self::Humidifier => COLOUR_HUMIDIFIER,
            Self::Lights => COLOUR_LIGHTS,
            Self::Reserved => COLOUR_OFF,
        }
    }

    /// Whether the role's actuator is on in `state`.
    pub const fn is_active(self, state: &ActuatorState) -> bool {
        match self {
            Self::Fan => state.fan,
            Self::Humidifier => state.humidifier,
            Self::Lights => state.lights,
            Self::Reserved => false,
        }
    }
}

/// Row index → meaning.
pub const ROW_ROLES: [RowRole; GRID_SIZE] = [
    RowRole::Fan,
    RowRole::Humidifier,
    RowRole::Lights,
    RowRole::Reserved,
    RowRole::Reserved,
];

/// Row-major colour grid, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorGrid {
    pub cells: [[Rgb; GRID_SIZE]; GRID_SIZE],
}

impl Default for IndicatorGrid {
    fn default() -> Self {
        Self {
            cells: [[COLOUR_OFF; GRID_SIZE]; GRID_SIZE],
        }
    }
}

impl IndicatorGrid {
    pub fn row(&self, index: usize) -> &[Rgb; GRID_SIZE] {
        &self.cells[index]
    }

    /// Copy of the grid dimmed to `brightness_percent` (clamped to 100).
    pub fn scaled(&self, brightness_percent: u8) -> Self {
        let brightness = (u16::from(brightness_percent.min(100)) * 255 / 100) as u8;
        let mut out = *self;
        for cell in out.cells.iter_mut().flatten() {
            *cell = scale(*cell, brightness);
        }
        out
    }
}

/// Compute the indicator grid for `state`.
pub fn map(state: &ActuatorState) -> IndicatorGrid {
    let mut grid = IndicatorGrid::default();
    for (row, role) in grid.cells.iter_mut().zip(ROW_ROLES) {
        if role.is_active(state) {
            *row = [role.colour(); GRID_SIZE];
        }
    }
    grid
}

fn scale((r, g, b): Rgb, brightness: u8) -> Rgb {
    let br = brightness as u16;
    (
        ((r as u16 * br) / 255) as u8,
        ((g as u16 * br) / 255) as u8,
        ((b as u16 * br) / 255) as u8,
    )
}
