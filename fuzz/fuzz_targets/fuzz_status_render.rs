//! Fuzz target: bounded report rendering
//!
//! Builds a history from arbitrary bytes (raw f32 bit patterns, so NaN,
//! infinities and subnormals all show up) and verifies:
//! - Rendering never panics and never fails for a full history
//! - Both documents stay within their fixed capacity
//! - Every history entry is either written or counted as omitted
//!
//! cargo fuzz run fuzz_status_render

#![no_main]

use barnclimate::control::threshold::ActuatorState;
use barnclimate::history::{HistoryEntry, HistoryLog, MAX_HISTORY_CAPACITY};
use barnclimate::report::{
    EXPORT_DOC_CAPACITY, ReportContext, STATUS_DOC_CAPACITY, render_export_document,
    render_status_document,
};
use barnclimate::sensors::Reading;
use chrono::{DateTime, NaiveDateTime};
use libfuzzer_sys::fuzz_target;

fn f32_at(chunk: &[u8], at: usize) -> f32 {
    f32::from_bits(u32::from_le_bytes([
        chunk[at],
        chunk[at + 1],
        chunk[at + 2],
        chunk[at + 3],
    ]))
}

fn timestamp(secs: u32) -> NaiveDateTime {
    DateTime::from_timestamp(i64::from(secs), 0)
        .unwrap_or_default()
        .naive_utc()
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let flags = data[0];
    let refresh = u16::from(data[1]) * 257;

    let mut log = HistoryLog::new(MAX_HISTORY_CAPACITY);
    for chunk in data[2..].chunks_exact(12) {
        log.record(HistoryEntry {
            temperature: f32_at(chunk, 0),
            humidity: f32_at(chunk, 4),
            timestamp: timestamp(u32::from_le_bytes([chunk[8], chunk[9], chunk[10], chunk[11]])),
        });
    }
    let snapshot = log.snapshot();
    let latest = snapshot.first().map(|e| Reading {
        temperature: e.temperature,
        humidity: e.humidity,
        luminosity: e.temperature,
    });

    let ctx = ReportContext {
        actuators: ActuatorState {
            lights: flags & 1 != 0,
            fan: flags & 2 != 0,
            humidifier: flags & 4 != 0,
        },
        reading: latest.filter(|_| flags & 8 != 0),
        history: &snapshot,
        now: snapshot.first().map(|e| e.timestamp).filter(|_| flags & 16 != 0),
        refresh_secs: refresh,
    };

    let status = render_status_document(&ctx).expect("status head and tail always fit");
    assert!(status.as_str().len() <= STATUS_DOC_CAPACITY);
    assert_eq!(status.rows_written + status.rows_omitted, snapshot.len());

    let export = render_export_document(&ctx).expect("export head always fits");
    assert!(export.as_str().len() <= EXPORT_DOC_CAPACITY);
    assert_eq!(export.rows_written + export.rows_omitted, snapshot.len());
});
