//! SSD1306 128x64 monochrome OLED panel.
//!
//! Text is rasterised with `embedded-graphics` into a page-major frame
//! buffer: byte `x + page * 128` holds the eight vertical pixels of column
//! `x` in that page, LSB at the top.  This is the controller's GDDRAM
//! layout in horizontal addressing mode, so a flush is one linear copy.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the buffer is written over I2C after every frame.
//! On host/test: the last frame and its raster are kept in memory only.

use core::convert::Infallible;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::report::{DISPLAY_LINES, DisplayFrame};

pub const OLED_WIDTH: usize = 128;
pub const OLED_HEIGHT: usize = 64;
const PAGES: usize = OLED_HEIGHT / 8;
pub const BUFFER_LEN: usize = OLED_WIDTH * PAGES;

/// Vertical distance between text baselines (font height).
pub const LINE_PITCH: i32 = 10;

const _: () = assert!(DISPLAY_LINES as i32 * LINE_PITCH <= OLED_HEIGHT as i32);

// ── Frame buffer ──────────────────────────────────────────────

#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_LEN],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            bytes: [0; BUFFER_LEN],
        }
    }
}

impl FrameBuffer {
    /// Whether the pixel at (`x`, `y`) is lit.  Out of range reads as off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= OLED_WIDTH || y >= OLED_HEIGHT {
            return false;
        }
        self.bytes[x + (y / 8) * OLED_WIDTH] & (1 << (y % 8)) != 0
    }

    pub fn as_bytes(&self) -> &[u8; BUFFER_LEN] {
        &self.bytes
    }

    /// Number of lit pixels in rows `top..bottom`.
    pub fn lit_in_rows(&self, top: usize, bottom: usize) -> usize {
        (top..bottom.min(OLED_HEIGHT))
            .flat_map(|y| (0..OLED_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y))
            .count()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(OLED_WIDTH as u32, OLED_HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= OLED_WIDTH || y >= OLED_HEIGHT {
                continue;
            }
            let byte = &mut self.bytes[x + (y / 8) * OLED_WIDTH];
            let mask = 1 << (y % 8);
            if color.is_on() {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
        Ok(())
    }
}

/// Rasterise `frame` into `buffer`, one text line per [`LINE_PITCH`].
pub fn draw_frame(buffer: &mut FrameBuffer, frame: &DisplayFrame) {
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    buffer.bytes = [0; BUFFER_LEN];
    for (index, line) in frame.lines.iter().enumerate() {
        let origin = Point::new(0, index as i32 * LINE_PITCH);
        let Ok(_) = Text::with_baseline(line.as_str(), origin, style, Baseline::Top).draw(buffer);
    }
}

// ── Panel driver ──────────────────────────────────────────────

/// 7-bit I2C address of the panel (SA0 tied low).
pub const OLED_I2C_ADDR: u8 = 0x3C;

/// Power-up sequence for a 128x64 charge-pump module.
#[cfg(target_os = "espidf")]
const INIT_SEQUENCE: [u8; 25] = [
    0xAE, // display off
    0xD5, 0x80, // clock divide
    0xA8, 0x3F, // multiplex 64
    0xD3, 0x00, // no offset
    0x40, // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1, // segment remap
    0xC8, // COM scan descending
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge
    0xDB, 0x40, // VCOMH
    0xA4, // resume from RAM
    0xA6, // normal polarity
    0xAF, // display on
];

pub struct OledPanel {
    buffer: FrameBuffer,
    frame: DisplayFrame,
    #[cfg(target_os = "espidf")]
    i2c: esp_idf_hal::i2c::I2cDriver<'static>,
}

impl OledPanel {
    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            buffer: FrameBuffer::default(),
            frame: DisplayFrame::default(),
        }
    }

    #[cfg(target_os = "espidf")]
    pub fn new(
        i2c: esp_idf_hal::i2c::I2cDriver<'static>,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut panel = Self {
            buffer: FrameBuffer::default(),
            frame: DisplayFrame::default(),
            i2c,
        };
        panel.command(&INIT_SEQUENCE)?;
        panel.flush()?;
        Ok(panel)
    }

    /// Rasterise and display `frame`.
    pub fn show(&mut self, frame: &DisplayFrame) {
        draw_frame(&mut self.buffer, frame);
        self.frame = frame.clone();
        #[cfg(target_os = "espidf")]
        if let Err(e) = self.flush() {
            log::warn!("OLED flush failed: {e}");
        }
    }

    /// Last frame handed to the panel.
    pub fn frame(&self) -> &DisplayFrame {
        &self.frame
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    #[cfg(target_os = "espidf")]
    fn command(&mut self, bytes: &[u8]) -> Result<(), esp_idf_hal::sys::EspError> {
        use esp_idf_hal::delay::BLOCK;

        for &byte in bytes {
            self.i2c.write(OLED_I2C_ADDR, &[0x00, byte], BLOCK)?;
        }
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn flush(&mut self) -> Result<(), esp_idf_hal::sys::EspError> {
        use esp_idf_hal::delay::BLOCK;

        const CHUNK: usize = 16;
        self.command(&[0x21, 0, (OLED_WIDTH - 1) as u8, 0x22, 0, (PAGES - 1) as u8])?;
        let mut packet = [0x40u8; CHUNK + 1];
        for chunk in self.buffer.bytes.chunks(CHUNK) {
            packet[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(OLED_I2C_ADDR, &packet[..=chunk.len()], BLOCK)?;
        }
        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for OledPanel {
    fn default() -> Self {
        Self::new()
    }
}
