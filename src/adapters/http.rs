//! HTTP report transport.
//!
//! Maps request paths onto [`ReportRequest`]s and turns the controller's
//! [`Report`]s into responses.  Routing and response building are pure and
//! run on the host; only [`start_server`] touches `esp_idf_svc`.
//!
//! | Path            | Document                | Content-Type               |
//! |-----------------|-------------------------|----------------------------|
//! | `/`             | status page             | `text/html; charset=utf-8` |
//! | `/index.html`   | status page             | `text/html; charset=utf-8` |
//! | `/history.csv`  | history export (download) | `text/csv`               |

use log::error;

use crate::app::commands::{Report, ReportRequest};
use crate::app::ports::{ClockPort, EventSink};
use crate::app::service::Controller;
use crate::error::RenderError;

/// Every path the server answers.
pub const ROUTES: [&str; 3] = ["/", "/index.html", "/history.csv"];

/// Resolve a request target (query string ignored).
pub fn route(path: &str) -> Option<ReportRequest> {
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    match path {
        "/" | "/index.html" => Some(ReportRequest::StatusPage),
        "/history.csv" => Some(ReportRequest::HistoryExport),
        _ => None,
    }
}

pub type Headers = heapless::Vec<(&'static str, &'static str), 2>;

/// Response headers for `request`.
pub fn response_headers(request: ReportRequest) -> Headers {
    let mut headers = Headers::new();
    // Capacity holds both headers.
    let _ = headers.push(("Content-Type", request.content_type()));
    if let Some(disposition) = request.disposition() {
        let _ = headers.push(("Content-Disposition", disposition));
    }
    headers
}

/// Outcome of one HTTP request.
#[derive(Debug)]
pub enum Response {
    Document(Report),
    NotFound,
    RenderFailed(RenderError),
}

impl Response {
    pub fn status(&self) -> u16 {
        match self {
            Self::Document(_) => 200,
            Self::NotFound => 404,
            Self::RenderFailed(_) => 500,
        }
    }

    pub fn headers(&self) -> Headers {
        match self {
            Self::Document(report) => response_headers(report.request()),
            Self::NotFound | Self::RenderFailed(_) => {
                let mut headers = Headers::new();
                let _ = headers.push(("Content-Type", "text/plain"));
                headers
            }
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Document(report) => report.body(),
            Self::NotFound => "not found\n",
            Self::RenderFailed(_) => "report could not be rendered\n",
        }
    }
}

/// Answer a request for `path` from the controller's current state.
pub fn respond(
    controller: &Controller,
    path: &str,
    clock: &impl ClockPort,
    sink: &mut impl EventSink,
) -> Response {
    let Some(request) = route(path) else {
        return Response::NotFound;
    };
    match controller.handle_request(request, clock, sink) {
        Ok(report) => Response::Document(report),
        Err(e) => {
            error!("HTTP | {path}: {e}");
            Response::RenderFailed(e)
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF server
// ───────────────────────────────────────────────────────────────

/// Controller handle shared between the control loop and HTTP handlers.
pub type SharedController = std::sync::Arc<std::sync::Mutex<Controller>>;

/// Register a GET handler for every route.  The server stops when the
/// returned handle is dropped.
#[cfg(target_os = "espidf")]
pub fn start_server(
    controller: SharedController,
    clock: crate::adapters::time::SystemClock,
) -> anyhow::Result<esp_idf_svc::http::server::EspHttpServer<'static>> {
    use esp_idf_svc::http::Method;
    use esp_idf_svc::http::server::{Configuration, EspHttpServer};
    use esp_idf_svc::io::Write;

    use crate::adapters::log_sink::LogEventSink;

    let mut server = EspHttpServer::new(&Configuration::default())?;
    for path in ROUTES {
        let controller = controller.clone();
        server.fn_handler(path, Method::Get, move |req| -> anyhow::Result<()> {
            let response = {
                let controller = controller
                    .lock()
                    .map_err(|_| anyhow::anyhow!("controller lock poisoned"))?;
                respond(&controller, path, &clock, &mut LogEventSink::new())
            };
            let mut resp = req.into_response(response.status(), None, &response.headers())?;
            resp.write_all(response.body().as_bytes())?;
            Ok(())
        })?;
    }
    log::info!("HTTP | serving {} routes", ROUTES.len());
    Ok(server)
}
