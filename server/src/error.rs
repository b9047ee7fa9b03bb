use std::collections::HashMap;
use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;
use kernel::{FieldViolation, KernelError};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

/// Wire shape for every failed request: a short error class, the detection
/// message and, for validation failures, a field-to-message map.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: &'static str,
    message: String,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<HashMap<String, String>>,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let report = self.0;
        let (status, error) = match report.current_context() {
            KernelError::InvalidArgument => (StatusCode::BAD_REQUEST, "Invalid Argument"),
            KernelError::Validation => (StatusCode::BAD_REQUEST, "Validation Error"),
            KernelError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            KernelError::Conflict => (StatusCode::CONFLICT, "Conflict"),
            KernelError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };
        let message = printable_message(&report);
        let violations = FieldViolation::extract(&report);
        let details = (!violations.is_empty()).then(|| {
            violations
                .into_iter()
                .map(|violation| (violation.field().to_string(), violation.message().to_string()))
                .collect::<HashMap<_, _>>()
        });
        tracing::error!("request failed: {message}");
        let body = ErrorResponse {
            error,
            message,
            timestamp: OffsetDateTime::now_utc(),
            details,
        };
        (status, axum::Json(body)).into_response()
    }
}

/// First printable attached at the point of detection, falling back to the
/// context description.
fn printable_message(report: &Report<KernelError>) -> String {
    report
        .frames()
        .find_map(|frame| {
            frame
                .downcast_ref::<String>()
                .cloned()
                .or_else(|| frame.downcast_ref::<&'static str>().map(|s| s.to_string()))
        })
        .unwrap_or_else(|| report.current_context().to_string())
}
