//! Request failure taxonomy.
//!
//! `Cancelled` is kept apart from every other variant: it is returned to the
//! caller but never written into [`super::RequestState`].

use crate::error::ErrorCode;

/// Message shown when a failed response carries no `message` field.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong, please try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The request was aborted by disposal or an explicit cancel.
    #[error("request cancelled")]
    Cancelled,

    /// The transport failed before a response arrived.
    #[error("network request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}: {}", .message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Server { status: u16, message: Option<String> },

    /// The success body could not be decoded into the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The request could not be built (bad header, unreadable multipart part).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

impl RequestError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Text suitable for an error modal: the server's own message when it sent
    /// one, otherwise the generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message: Some(message), .. } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl ErrorCode for RequestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => "E_CANCELLED",
            Self::Network(_) => "E_NETWORK",
            Self::Server { .. } => "E_SERVER",
            Self::Parse(_) => "E_PARSE",
            Self::InvalidRequest(_) => "E_INVALID_REQUEST",
            Self::ClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { status: 429 | 500..=599, .. })
    }
}

/// Pull the human-readable `message` out of an error envelope, if any.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
