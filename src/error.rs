//! Error types for the write path.
//!
//! The read path has no error type: loading always succeeds (see
//! [`crate::source`]).

use std::io;

use hyper::StatusCode;
use thiserror::Error;

/// Errors that can occur when replacing the persisted snapshot.
///
/// Whatever the variant, the previously persisted document is untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not create the temporary file next to the snapshot.
    #[error("Failed to create temp file: {0}")]
    TempFile(#[source] io::Error),

    /// Could not write or sync the temporary file.
    #[error("Failed to write temp file: {0}")]
    Write(#[source] io::Error),

    /// Could not move the temporary file over the snapshot.
    #[error("Failed to persist snapshot: {0}")]
    Persist(#[source] io::Error),
}

/// Reasons an ingestion request is rejected.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Error: This endpoint only accepts POST requests.")]
    MethodNotAllowed,

    #[error("Error: Secret token is missing from the URL.")]
    MissingToken,

    #[error("Error: Invalid secret token.")]
    InvalidToken,

    #[error("Error: No data received in the request body.")]
    EmptyBody,

    #[error("Error: Request body too large.")]
    BodyTooLarge,

    /// The connection failed while the body was being received.
    #[error("Error: Could not read the request body.")]
    BodyRead(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Error: Invalid JSON format received.")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Error: Could not write data to the status file. Check server permissions.")]
    Persist(#[from] StoreError),
}

impl IngestError {
    /// HTTP status reported to the reporter.
    pub fn status_code(&self) -> StatusCode {
        match self {
            IngestError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            IngestError::MissingToken => StatusCode::UNAUTHORIZED,
            IngestError::InvalidToken => StatusCode::FORBIDDEN,
            IngestError::EmptyBody | IngestError::BodyRead(_) | IngestError::MalformedJson(_) => {
                StatusCode::BAD_REQUEST
            }
            IngestError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            IngestError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client errors are the reporter's fault and were never applied.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}
