use crate::ExportFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The input was rejected before any request was sent
    /// (e.g. a missing required form field or an empty artifact id).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the service failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returned a non-success status code. Carries the
    /// `message` field of the error body when the service sent one.
    #[error("Status error: {message} (Status {0})", message = .1.as_deref().unwrap_or("no message"))]
    StatusCode(reqwest::StatusCode, Option<String>),
    /// The service answered with `status` other than `"success"`.
    #[error("Request failed: {0}")]
    Failed(String),
    /// The response was missing something the client relies on
    /// (e.g. `download_url` in an export response).
    #[error("Invariant: {0}")]
    Invariant(String),
    /// An export of this format is already in flight.
    #[error("Export to {0} is already in progress")]
    Busy(ExportFormat),
    /// No session token is stored. Protected views redirect to login.
    #[error("Not authenticated")]
    Unauthenticated,
    /// The account exists but its email has not been verified yet.
    #[error("OTP verification required: {0}")]
    OtpRequired(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// The message provided by the service, if the failure carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::StatusCode(_, message) => message.as_deref(),
            Self::Failed(message) | Self::OtpRequired(message) => Some(message),
            _ => None,
        }
    }

    /// The HTTP status of a non-success response.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::StatusCode(status, _) => Some(*status),
            Self::Transport(error) => error.status(),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
