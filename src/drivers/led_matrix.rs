//! 5x5 WS2812B indicator matrix.
//!
//! The pixels are chained in a serpentine: row 0 runs left to right, row 1
//! right to left, and so on.  Each pixel takes three bytes in G, R, B order,
//! most significant bit first.
//!
//! ```text
//!  data in ─▶ 0  1  2  3  4
//!             9  8  7  6  5 ◀─
//!         ─▶ 10 11 12 13 14
//!            19 18 17 16 15 ◀─
//!         ─▶ 20 21 22 23 24
//! ```
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the frame is clocked out through an RMT TX channel.
//! On host/test: the last frame is kept in memory only.

use crate::indicator::{GRID_SIZE, IndicatorGrid};

pub const PIXEL_COUNT: usize = GRID_SIZE * GRID_SIZE;
/// Wire bytes per full frame.
pub const FRAME_LEN: usize = PIXEL_COUNT * 3;

pub type Frame = [u8; FRAME_LEN];

/// Chain position of the cell at (`row`, `col`).
pub const fn chain_index(row: usize, col: usize) -> usize {
    if row % 2 == 0 {
        row * GRID_SIZE + col
    } else {
        row * GRID_SIZE + (GRID_SIZE - 1 - col)
    }
}

/// Serialise `grid` into the wire frame.
pub fn encode_frame(grid: &IndicatorGrid) -> Frame {
    let mut frame = [0u8; FRAME_LEN];
    for (row, cells) in grid.cells.iter().enumerate() {
        for (col, &(r, g, b)) in cells.iter().enumerate() {
            let at = chain_index(row, col) * 3;
            frame[at..at + 3].copy_from_slice(&[g, r, b]);
        }
    }
    frame
}

pub struct LedMatrix {
    frame: Frame,
    #[cfg(target_os = "espidf")]
    tx: esp_idf_hal::rmt::TxRmtDriver<'static>,
}

impl LedMatrix {
    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            frame: [0; FRAME_LEN],
        }
    }

    #[cfg(target_os = "espidf")]
    pub fn new(
        channel: impl esp_idf_hal::peripheral::Peripheral<P = impl esp_idf_hal::rmt::RmtChannel>
        + 'static,
        pin: impl esp_idf_hal::peripheral::Peripheral<P = impl esp_idf_hal::gpio::OutputPin>
        + 'static,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        use esp_idf_hal::rmt::config::TransmitConfig;

        let config = TransmitConfig::new().clock_divider(1);
        let tx = esp_idf_hal::rmt::TxRmtDriver::new(channel, pin, &config)?;
        Ok(Self {
            frame: [0; FRAME_LEN],
            tx,
        })
    }

    /// Encode and display `grid`.
    pub fn show(&mut self, grid: &IndicatorGrid) {
        self.frame = encode_frame(grid);
        #[cfg(target_os = "espidf")]
        if let Err(e) = self.transmit() {
            log::warn!("LED matrix transmit failed: {e}");
        }
    }

    /// Last frame handed to the hardware.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    #[cfg(target_os = "espidf")]
    fn transmit(&mut self) -> Result<(), esp_idf_hal::sys::EspError> {
        use core::time::Duration;
        use esp_idf_hal::rmt::{PinState, Pulse, VariableLengthSignal};

        let ticks_hz = self.tx.counter_clock()?;
        let t0h = Pulse::new_with_duration(ticks_hz, PinState::High, &Duration::from_nanos(350))?;
        let t0l = Pulse::new_with_duration(ticks_hz, PinState::Low, &Duration::from_nanos(800))?;
        let t1h = Pulse::new_with_duration(ticks_hz, PinState::High, &Duration::from_nanos(700))?;
        let t1l = Pulse::new_with_duration(ticks_hz, PinState::Low, &Duration::from_nanos(600))?;

        let mut signal = VariableLengthSignal::with_capacity(FRAME_LEN * 8 * 2);
        for byte in self.frame {
            for bit in (0..8).rev() {
                let pulses = if byte & (1 << bit) != 0 {
                    [&t1h, &t1l]
                } else {
                    [&t0h, &t0l]
                };
                signal.push(pulses)?;
            }
        }
        self.tx.start_blocking(&signal)
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for LedMatrix {
    fn default() -> Self {
        Self::new()
    }
}
