//! Error types for reporting.

use thiserror::Error;

/// Errors that can occur when pushing a snapshot.
#[derive(Debug, Error)]
pub enum ReportError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The snapshot could not be encoded as JSON.
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The endpoint answered with a non-success status.
    #[error("Endpoint rejected snapshot with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ReportError::Timeout
        } else if err.is_connect() {
            ReportError::Connection(err.to_string())
        } else {
            ReportError::Http(err.to_string())
        }
    }
}
