//! Report rendering: status page, history export and OLED panel text.
//!
//! Every renderer is a pure function of a [`ReportContext`]: it reads the
//! actuator state, the latest reading and a history snapshot, and never
//! touches the controller.  Documents are written into fixed-size buffers;
//! when the history does not fit, the oldest rows are left out and a single
//! "omitted" notice takes their place.
//!
//! ```text
//!   ┌──────┐  ┌───────────── rows, newest first ─────────────┐  ┌────────┐  ┌──────┐
//!   │ head │  │ row 0 │ row 1 │ …  (stop when next row + reserve │ notice │  │ tail │
//!   └──────┘  └───────────────────  would exceed N) ─────────────┘  └────────┘  └──────┘
//! ```

pub mod display;
pub mod export;
pub mod status;
pub mod writer;

use core::fmt::{self, Write};

use chrono::NaiveDateTime;

use crate::control::threshold::ActuatorState;
use crate::error::RenderError;
use crate::history::HistoryEntry;
use crate::sensors::Reading;
use writer::{BoundedWriter, measure};

pub use display::{DISPLAY_COLUMNS, DISPLAY_LINES, DisplayFrame, DisplayLine, render_display};
pub use export::HistoryExport;
pub use status::StatusPage;

/// Output bound of the status page (bytes).
pub const STATUS_DOC_CAPACITY: usize = 4096;
/// Output bound of the history export (bytes).
pub const EXPORT_DOC_CAPACITY: usize = 2048;

/// Timestamp layout shared by every report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything a renderer may look at.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub actuators: ActuatorState,
    /// Latest accepted reading; `None` before the first tick.
    pub reading: Option<Reading>,
    /// History snapshot, newest first.
    pub history: &'a [HistoryEntry],
    /// Render time; `None` while the wall clock is unsynced.
    pub now: Option<NaiveDateTime>,
    /// Status page auto-refresh period.
    pub refresh_secs: u16,
}

/// A rendered, size-bounded document.
#[derive(Debug, Clone)]
pub struct RenderedDocument<const N: usize> {
    pub body: heapless::String<N>,
    /// History rows present in `body`.
    pub rows_written: usize,
    /// Oldest history rows left out to respect the bound.
    pub rows_omitted: usize,
}

impl<const N: usize> RenderedDocument<N> {
    pub fn as_str(&self) -> &str {
        self.body.as_str()
    }

    pub fn is_truncated(&self) -> bool {
        self.rows_omitted > 0
    }
}

/// Section writers for a document with one row per history entry.
pub trait DocumentLayout {
    /// Everything before the first history row.
    fn head(&self, w: &mut dyn Write, ctx: &ReportContext<'_>) -> fmt::Result;
    /// One history row.
    fn row(&self, w: &mut dyn Write, entry: &HistoryEntry) -> fmt::Result;
    /// Placeholder for `count` rows left out.
    fn omitted(&self, w: &mut dyn Write, count: usize) -> fmt::Result;
    /// Everything after the last history row.
    fn tail(&self, w: &mut dyn Write, ctx: &ReportContext<'_>) -> fmt::Result;
}

/// Render `layout` into at most `N` bytes, dropping the oldest rows first.
///
/// Fails only when head, notice and tail alone exceed `N`.
pub fn render_bounded<L: DocumentLayout, const N: usize>(
    layout: &L,
    ctx: &ReportContext<'_>,
) -> Result<RenderedDocument<N>, RenderError> {
    let overflow = |section| RenderError::Overflow {
        section,
        capacity: N,
    };
    let mut out = BoundedWriter::<N>::new();
    layout.head(&mut out, ctx).map_err(|_| overflow("head"))?;

    let total = ctx.history.len();
    let tail_len = measure(|w| layout.tail(w, ctx));
    // Worst case: the notice for every row has the most digits.
    let notice_len = if total > 0 {
        measure(|w| layout.omitted(w, total))
    } else {
        0
    };
    if !out.fits(notice_len + tail_len) {
        return Err(overflow("tail"));
    }

    // Invariant: after each written row, notice + tail still fit.
    let mut rows_written = 0;
    for entry in ctx.history {
        let row_len = measure(|w| layout.row(w, entry));
        let rows_left = total - rows_written - 1;
        let reserve = tail_len + if rows_left > 0 { notice_len } else { 0 };
        if !out.fits(row_len + reserve) {
            break;
        }
        layout.row(&mut out, entry).map_err(|_| overflow("row"))?;
        rows_written += 1;
    }

    let rows_omitted = total - rows_written;
    if rows_omitted > 0 {
        layout
            .omitted(&mut out, rows_omitted)
            .map_err(|_| overflow("notice"))?;
    }
    layout.tail(&mut out, ctx).map_err(|_| overflow("tail"))?;

    Ok(RenderedDocument {
        body: out.into_inner(),
        rows_written,
        rows_omitted,
    })
}

/// HTML status page bounded by [`STATUS_DOC_CAPACITY`].
pub fn render_status_document(
    ctx: &ReportContext<'_>,
) -> Result<RenderedDocument<STATUS_DOC_CAPACITY>, RenderError> {
    render_bounded(&StatusPage, ctx)
}

/// CSV history export bounded by [`EXPORT_DOC_CAPACITY`].
pub fn render_export_document(
    ctx: &ReportContext<'_>,
) -> Result<RenderedDocument<EXPORT_DOC_CAPACITY>, RenderError> {
    render_bounded(&HistoryExport, ctx)
}

/// Write `ts` in [`TIMESTAMP_FORMAT`], or a placeholder while unsynced.
pub(crate) fn write_timestamp(w: &mut dyn Write, ts: Option<NaiveDateTime>) -> fmt::Result {
    match ts {
        Some(ts) => write!(w, "{}", ts.format(TIMESTAMP_FORMAT)),
        None => w.write_str("unsynced"),
    }
}
