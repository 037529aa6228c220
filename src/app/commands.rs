//! Inbound report requests and their rendered replies.
//!
//! These represent what the outside world (HTTP clients) can ask the
//! [`Controller`](super::service::Controller) for.

use crate::report::{EXPORT_DOC_CAPACITY, RenderedDocument, STATUS_DOC_CAPACITY};

/// Documents an external transport can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportRequest {
    /// Auto-refreshing HTML dashboard.
    StatusPage,
    /// CSV dump of the history log.
    HistoryExport,
}

impl ReportRequest {
    pub const ALL: [Self; 2] = [Self::StatusPage, Self::HistoryExport];

    /// Canonical URI the document is served at.
    pub const fn path(self) -> &'static str {
        match self {
            Self::StatusPage => "/",
            Self::HistoryExport => "/history.csv",
        }
    }

    /// `Content-Type` header value.
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::StatusPage => "text/html; charset=utf-8",
            Self::HistoryExport => "text/csv",
        }
    }

    /// `Content-Disposition` header value, if the document is a download.
    pub const fn disposition(self) -> Option<&'static str> {
        match self {
            Self::StatusPage => None,
            Self::HistoryExport => Some("attachment; filename=\"history.csv\""),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::StatusPage => "status",
            Self::HistoryExport => "export",
        }
    }
}

/// A rendered reply to a [`ReportRequest`].
#[derive(Debug, Clone)]
pub enum Report {
    Status(RenderedDocument<STATUS_DOC_CAPACITY>),
    Export(RenderedDocument<EXPORT_DOC_CAPACITY>),
}

impl Report {
    pub fn request(&self) -> ReportRequest {
        match self {
            Self::Status(_) => ReportRequest::StatusPage,
            Self::Export(_) => ReportRequest::HistoryExport,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Status(doc) => doc.as_str(),
            Self::Export(doc) => doc.as_str(),
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.request().content_type()
    }

    pub fn rows_omitted(&self) -> usize {
        match self {
            Self::Status(doc) => doc.rows_omitted,
            Self::Export(doc) => doc.rows_omitted,
        }
    }
}
