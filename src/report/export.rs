//! CSV history export.
//!
//! ```text
//! Shelter environment history
//! Generated,2026-10-18 12:05:00
//! timestamp,temperature_c,humidity_pct
//! 2026-10-18 12:00:00,30.0,40.0
//! ```
//!
//! Rows follow the snapshot order (newest first).  Rows dropped to respect
//! the bound are reported in a trailing `#` comment line.

use core::fmt::{self, Write};

use super::{DocumentLayout, ReportContext, write_timestamp};
use crate::history::HistoryEntry;

pub const TITLE_LINE: &str = "Shelter environment history";
pub const COLUMN_HEADER: &str = "timestamp,temperature_c,humidity_pct";

/// CSV export layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryExport;

impl DocumentLayout for HistoryExport {
    fn head(&self, w: &mut dyn Write, ctx: &ReportContext<'_>) -> fmt::Result {
        writeln!(w, "{TITLE_LINE}")?;
        w.write_str("Generated,")?;
        write_timestamp(w, ctx.now)?;
        writeln!(w, "\n{COLUMN_HEADER}")
    }

    fn row(&self, w: &mut dyn Write, entry: &HistoryEntry) -> fmt::Result {
        write_timestamp(w, Some(entry.timestamp))?;
        writeln!(w, ",{:.1},{:.1}", entry.temperature, entry.humidity)
    }

    fn omitted(&self, w: &mut dyn Write, count: usize) -> fmt::Result {
        let noun = if count == 1 { "entry" } else { "entries" };
        writeln!(w, "# {count} older {noun} omitted")
    }

    fn tail(&self, _w: &mut dyn Write, _ctx: &ReportContext<'_>) -> fmt::Result {
        Ok(())
    }
}
