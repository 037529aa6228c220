//! Integration tests for the HTTP transport: route → controller → response.

use super::mock_hw::{MockClock, MockHardware, RecordingSink, base_time, reading, shelter_config};

use barnclimate::adapters::http::{self, Response};
use barnclimate::app::commands::ReportRequest;
use barnclimate::app::events::AppEvent;
use barnclimate::app::service::Controller;

fn ticked_controller() -> Controller {
    let mut app = Controller::new(shelter_config()).unwrap();
    let mut hw = MockHardware::new(reading(30.0, 40.0, 50.0));
    app.tick(&mut hw, &MockClock::fixed(base_time()), &mut RecordingSink::new());
    app
}

#[test]
fn status_page_served_at_root_and_index() {
    let app = ticked_controller();
    let clock = MockClock::fixed(base_time());
    let mut sink = RecordingSink::new();

    for path in ["/", "/index.html"] {
        let response = http::respond(&app, path, &clock, &mut sink);
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().as_slice(),
            &[("Content-Type", "text/html; charset=utf-8")]
        );
        assert!(response.body().contains("<th>Fan</th><td class=\"on\">ON</td>"));
    }
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::ReportServed {
                request: ReportRequest::StatusPage,
                ..
            }
        )),
        2
    );
}

#[test]
fn export_served_as_download() {
    let app = ticked_controller();
    let clock = MockClock::fixed(base_time());
    let mut sink = RecordingSink::new();

    let response = http::respond(&app, "/history.csv", &clock, &mut sink);

    assert_eq!(response.status(), 200);
    assert!(
        response
            .headers()
            .contains(&("Content-Disposition", "attachment; filename=\"history.csv\""))
    );
    assert!(
        response
            .body()
            .ends_with("timestamp,temperature_c,humidity_pct\n2026-10-18 00:00:00,30.0,40.0\n")
    );
}

#[test]
fn unknown_path_is_not_found() {
    let app = ticked_controller();
    let mut sink = RecordingSink::new();

    let response = http::respond(&app, "/setup", &MockClock::fixed(base_time()), &mut sink);

    assert!(matches!(response, Response::NotFound));
    assert_eq!(response.status(), 404);
    assert!(sink.events.is_empty(), "nothing rendered, nothing reported");
}

#[test]
fn every_request_has_a_route() {
    for request in ReportRequest::ALL {
        assert_eq!(http::route(request.path()), Some(request));
    }
}
