//! OLED status panel text (SSD1306 128x64, 6x10 font → 6 lines × 21 columns).

use core::fmt::{self, Write};

use super::ReportContext;
use super::writer::BoundedWriter;

pub const DISPLAY_COLUMNS: usize = 21;
pub const DISPLAY_LINES: usize = 6;

pub type DisplayLine = heapless::String<DISPLAY_COLUMNS>;

/// One full panel of text, top line first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayFrame {
    pub lines: [DisplayLine; DISPLAY_LINES],
}

impl DisplayFrame {
    pub fn line(&self, index: usize) -> &str {
        self.lines[index].as_str()
    }
}

/// Render the panel for `ctx`.  Lines longer than the panel are cut at
/// [`DISPLAY_COLUMNS`] bytes.
pub fn render_display(ctx: &ReportContext<'_>) -> DisplayFrame {
    let reading = ctx.reading;
    let state = ctx.actuators;
    DisplayFrame {
        lines: [
            line(|w| match ctx.now {
                Some(now) => write!(w, "Shelter  {}", now.format("%H:%M:%S")),
                None => w.write_str("Shelter  --:--:--"),
            }),
            line(|w| match reading {
                Some(r) => write!(w, "T {:.1}C  H {:.1}%", r.temperature, r.humidity),
                None => w.write_str("T --C  H --%"),
            }),
            line(|w| match reading {
                Some(r) => write!(w, "Light {:.1}%", r.luminosity),
                None => w.write_str("Light --%"),
            }),
            line(|w| write!(w, "Lights  {}", on_off(state.lights))),
            line(|w| write!(w, "Fan     {}", on_off(state.fan))),
            line(|w| write!(w, "Humid.  {}", on_off(state.humidifier))),
        ],
    }
}

fn line(render: impl FnOnce(&mut BoundedWriter<DISPLAY_COLUMNS>) -> fmt::Result) -> DisplayLine {
    let mut w = BoundedWriter::new();
    // Overflow keeps the prefix that fits.
    let _ = render(&mut w);
    w.into_inner()
}

const fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
