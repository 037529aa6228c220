//! Integration tests for report rendering through the Controller.

use super::mock_hw::{MockClock, MockHardware, RecordingSink, base_time, reading, shelter_config};

use barnclimate::app::commands::{Report, ReportRequest};
use barnclimate::app::events::AppEvent;
use barnclimate::app::service::Controller;
use barnclimate::config::ControllerConfig;
use barnclimate::error::ClockError;
use barnclimate::history::MAX_HISTORY_CAPACITY;
use barnclimate::report::{EXPORT_DOC_CAPACITY, STATUS_DOC_CAPACITY};
use chrono::TimeDelta;

fn filled_controller(capacity: usize, ticks: usize) -> Controller {
    let config = ControllerConfig {
        history_capacity: capacity,
        ..shelter_config()
    };
    let mut app = Controller::new(config).unwrap();
    let mut hw = MockHardware::new(reading(20.0, 50.0, 50.0));
    let clock = MockClock::stepping(base_time(), TimeDelta::minutes(1));
    let mut sink = RecordingSink::new();
    for n in 0..ticks {
        // Widest values the sanitiser lets through.
        hw.queue(Ok(reading(-39.5 - (n % 5) as f32 / 10.0, 100.0, 50.0)));
        app.tick(&mut hw, &clock, &mut sink);
    }
    app
}

// ── Overflow scenario ─────────────────────────────────────────

#[test]
fn full_history_status_page_stays_within_bound() {
    let app = filled_controller(MAX_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY);
    let newest = base_time() + TimeDelta::minutes(MAX_HISTORY_CAPACITY as i64 - 1);

    let doc = app.render_status_document(Some(newest)).unwrap();
    let html = doc.as_str();

    assert!(html.len() <= STATUS_DOC_CAPACITY);
    assert!(doc.rows_omitted > 0, "64 rows cannot fit in the status page");
    assert_eq!(doc.rows_written + doc.rows_omitted, MAX_HISTORY_CAPACITY);
    assert!(html.contains("<td>2026-10-18 01:03:00</td>"), "newest row kept");
    assert!(!html.contains("<td>2026-10-18 00:00:00</td>"), "oldest row dropped");
    assert!(html.contains(&format!(
        "<tr><td colspan=\"3\">{} older entries omitted</td></tr>",
        doc.rows_omitted
    )));
    assert!(html.ends_with("</body></html>\n"));
}

#[test]
fn kept_rows_are_a_newest_first_prefix() {
    let app = filled_controller(MAX_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY);
    let doc = app.render_status_document(None).unwrap();
    let snapshot = app.history_snapshot();

    let mut cursor = 0;
    for entry in snapshot.iter().take(doc.rows_written) {
        let stamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        let at = doc.as_str()[cursor..]
            .find(&stamp)
            .expect("row present in order");
        cursor += at + stamp.len();
    }
    for entry in snapshot.iter().skip(doc.rows_written) {
        let stamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        assert!(!doc.as_str().contains(&stamp));
    }
}

#[test]
fn export_stays_within_bound() {
    let app = filled_controller(MAX_HISTORY_CAPACITY, MAX_HISTORY_CAPACITY + 5);
    let doc = app.render_export_document(Some(base_time())).unwrap();
    assert!(doc.as_str().len() <= EXPORT_DOC_CAPACITY);
    assert_eq!(doc.rows_written + doc.rows_omitted, MAX_HISTORY_CAPACITY);
}

// ── Request dispatch ──────────────────────────────────────────

#[test]
fn handle_request_reports_size_and_omissions() {
    let app = filled_controller(10, 3);
    let clock = MockClock::fixed(base_time());
    let mut sink = RecordingSink::new();

    let report = app
        .handle_request(ReportRequest::HistoryExport, &clock, &mut sink)
        .unwrap();

    assert!(matches!(report, Report::Export(_)));
    assert_eq!(report.content_type(), "text/csv");
    assert_eq!(report.body().lines().count(), 3 + 3);
    assert_eq!(
        sink.events,
        [AppEvent::ReportServed {
            request: ReportRequest::HistoryExport,
            bytes: report.body().len(),
            rows_omitted: 0,
        }]
    );
}

#[test]
fn reports_render_without_a_clock() {
    let app = filled_controller(10, 2);
    let clock = MockClock::failing(ClockError::Unavailable);
    let mut sink = RecordingSink::new();

    let report = app
        .handle_request(ReportRequest::StatusPage, &clock, &mut sink)
        .unwrap();
    assert!(report.body().contains("Updated: unsynced"));
    assert_eq!(report.request(), ReportRequest::StatusPage);
}

#[test]
fn rendering_does_not_mutate_state() {
    let app = filled_controller(10, 4);
    let before = app.history_snapshot();
    let state = app.state();

    let first = app.render_status_document(Some(base_time())).unwrap();
    let second = app.render_status_document(Some(base_time())).unwrap();
    app.render_export_document(None).unwrap();

    assert_eq!(first.as_str(), second.as_str());
    assert_eq!(app.history_snapshot(), before);
    assert_eq!(app.state(), state);
}

// ── OLED panel ────────────────────────────────────────────────

#[test]
fn display_shows_latest_state() {
    let mut app = Controller::new(shelter_config()).unwrap();
    let mut hw = MockHardware::new(reading(30.0, 40.0, 50.0));
    let clock = MockClock::fixed(base_time() + TimeDelta::hours(13));
    app.tick(&mut hw, &clock, &mut RecordingSink::new());

    let frame = app.render_display(Some(base_time() + TimeDelta::hours(13)));
    assert_eq!(frame.line(0), "Shelter  13:00:00");
    assert_eq!(frame.line(1), "T 30.0C  H 40.0%");
    assert_eq!(frame.line(2), "Light 50.0%");
    assert_eq!(frame.line(3), "Lights  OFF");
    assert_eq!(frame.line(4), "Fan     ON");
    assert_eq!(frame.line(5), "Humid.  ON");
}
