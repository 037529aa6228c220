//! HTML status page.
//!
//! Self-contained (inline CSS, no scripts): current readings, relay states,
//! the history table newest-first and a link to the CSV export.  The page
//! reloads itself every `refresh_secs` seconds.

use core::fmt::{self, Write};

use super::{DocumentLayout, ReportContext, write_timestamp};
use crate::history::HistoryEntry;

/// Path of the CSV export linked from the page.
pub const EXPORT_LINK: &str = "/history.csv";

const STYLE: &str = "<style>\
body{font-family:sans-serif;margin:1em;background:#f4f1ea;color:#222}\
h1{font-size:1.4em}h2{font-size:1.1em;margin-top:1.2em}\
table{border-collapse:collapse}\
td,th{border:1px solid #bbb;padding:4px 8px;text-align:right}\
th{background:#e2dccb}.on{color:#1a7f37;font-weight:bold}.off{color:#888}\
</style>";

/// Status page layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusPage;

impl DocumentLayout for StatusPage {
    fn head(&self, w: &mut dyn Write, ctx: &ReportContext<'_>) -> fmt::Result {
        w.write_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\n")?;
        w.write_str(
            "<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n",
        )?;
        writeln!(
            w,
            "<meta http-equiv=\"refresh\" content=\"{}\">",
            ctx.refresh_secs
        )?;
        w.write_str("<title>Shelter environment</title>\n")?;
        w.write_str(STYLE)?;
        w.write_str("</head><body>\n<h1>Shelter environment</h1>\n<p>Updated: ")?;
        write_timestamp(w, ctx.now)?;
        w.write_str("</p>\n")?;

        w.write_str("<h2>Current conditions</h2>\n<table>\n")?;
        let reading = ctx.reading;
        write_measure(w, "Temperature", reading.map(|r| r.temperature), " &deg;C")?;
        write_measure(w, "Humidity", reading.map(|r| r.humidity), " %")?;
        write_measure(w, "Luminosity", reading.map(|r| r.luminosity), " %")?;
        w.write_str("</table>\n")?;

        w.write_str("<h2>Actuators</h2>\n<table>\n")?;
        write_switch(w, "Lights", ctx.actuators.lights)?;
        write_switch(w, "Fan", ctx.actuators.fan)?;
        write_switch(w, "Humidifier", ctx.actuators.humidifier)?;
        w.write_str("</table>\n")?;

        w.write_str("<h2>History</h2>\n<table>\n")?;
        w.write_str(
            "<tr><th>Time</th><th>Temperature (&deg;C)</th><th>Humidity (%)</th></tr>\n",
        )
    }

    fn row(&self, w: &mut dyn Write, entry: &HistoryEntry) -> fmt::Result {
        w.write_str("<tr><td>")?;
        write_timestamp(w, Some(entry.timestamp))?;
        writeln!(
            w,
            "</td><td>{:.1}</td><td>{:.1}</td></tr>",
            entry.temperature, entry.humidity
        )
    }

    fn omitted(&self, w: &mut dyn Write, count: usize) -> fmt::Result {
        let noun = if count == 1 { "entry" } else { "entries" };
        writeln!(
            w,
            "<tr><td colspan=\"3\">{count} older {noun} omitted</td></tr>"
        )
    }

    fn tail(&self, w: &mut dyn Write, ctx: &ReportContext<'_>) -> fmt::Result {
        if ctx.history.is_empty() {
            w.write_str("<tr><td colspan=\"3\">No samples recorded yet</td></tr>\n")?;
        }
        w.write_str("</table>\n")?;
        writeln!(
            w,
            "<p><a href=\"{EXPORT_LINK}\">Download history (CSV)</a></p>"
        )?;
        w.write_str("</body></html>\n")
    }
}

fn write_measure(
    w: &mut dyn Write,
    label: &str,
    value: Option<f32>,
    unit: &str,
) -> fmt::Result {
    match value {
        Some(v) => writeln!(w, "<tr><th>{label}</th><td>{v:.1}{unit}</td></tr>"),
        None => writeln!(w, "<tr><th>{label}</th><td>--</td></tr>"),
    }
}

fn write_switch(w: &mut dyn Write, label: &str, on: bool) -> fmt::Result {
    let (class, text) = if on { ("on", "ON") } else { ("off", "OFF") };
    writeln!(
        w,
        "<tr><th>{label}</th><td class=\"{class}\">{text}</td></tr>"
    )
}
