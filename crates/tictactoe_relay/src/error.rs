//! Relay error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error};
use serde_json::json;
use tracing::{error, instrument, warn};

/// Which boundary a relay failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RelayErrorKind {
    /// The notification payload was malformed.
    #[display("validation")]
    Validation,
    /// Telegram credentials are not configured.
    #[display("configuration")]
    Configuration,
    /// Telegram was unreachable or rejected the message.
    #[display("delivery")]
    Delivery,
}

/// Relay error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Relay {} error: {} at {}:{}", kind, message, file, line)]
pub struct RelayError {
    /// Failure class.
    pub kind: RelayErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RelayError {
    /// Creates a new relay error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: RelayErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Malformed request payload.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(RelayErrorKind::Validation, message)
    }

    /// Missing or unusable configuration.
    #[track_caller]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(RelayErrorKind::Configuration, message)
    }

    /// Telegram delivery failure.
    #[track_caller]
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::new(RelayErrorKind::Delivery, message)
    }

    /// HTTP status reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self.kind {
            RelayErrorKind::Validation => StatusCode::BAD_REQUEST,
            RelayErrorKind::Configuration | RelayErrorKind::Delivery => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for RelayError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        // The request URL embeds the bot token.
        Self::delivery(format!("Telegram request failed: {}", err.without_url()))
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.kind {
            RelayErrorKind::Validation => {
                warn!(details = %self.message, "Rejected notification payload");
                json!({ "error": "Invalid request", "details": self.message })
            }
            RelayErrorKind::Configuration | RelayErrorKind::Delivery => {
                error!(error = %self, "Notification not delivered");
                json!({ "success": false, "message": "Failed to send notification" })
            }
        };
        (status, Json(body)).into_response()
    }
}
