//! Error types for the HTTP adapter

use therabot_application::GatewayError;
use thiserror::Error;

/// Result type alias for HTTP adapter operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// Errors that can occur when talking to the chat server over HTTP
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned status {status}")]
    Status { status: u16 },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },
}

impl From<HttpError> for GatewayError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Status { status } => GatewayError::Status { status },
            HttpError::ParseError { error, .. } => GatewayError::InvalidBody(error),
            HttpError::Request(e) if e.is_decode() => GatewayError::InvalidBody(e.to_string()),
            HttpError::Request(e) => GatewayError::ConnectionError(e.to_string()),
            other => GatewayError::Other(other.to_string()),
        }
    }
}
