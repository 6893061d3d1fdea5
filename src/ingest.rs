//! Snapshot ingestion.
//!
//! An authorized reporter POSTs a complete snapshot. The body is checked only
//! for being well-formed JSON; its shape is the loader's concern at read time.

use std::sync::Arc;

use hyper::{Method, StatusCode};
use tracing::{info, warn};

use crate::error::IngestError;
use crate::store::SnapshotStore;

/// Confirmation returned to the reporter on success.
pub const SUCCESS_MESSAGE: &str = "Success: Status data received and updated successfully.";

/// Status code and plain-text message answered to the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    pub status: StatusCode,
    pub message: String,
}

impl IngestOutcome {
    fn success() -> Self {
        Self {
            status: StatusCode::OK,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

impl From<IngestError> for IngestOutcome {
    fn from(err: IngestError) -> Self {
        Self {
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

/// Validates and persists snapshot submissions.
#[derive(Debug, Clone)]
pub struct Ingestor {
    store: Arc<SnapshotStore>,
    secret: String,
}

impl Ingestor {
    pub fn new(store: Arc<SnapshotStore>, secret: impl Into<String>) -> Self {
        Self {
            store,
            secret: secret.into(),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Handle one submission and produce the response for the reporter.
    pub fn handle(&self, method: &Method, token: Option<&str>, body: &[u8]) -> IngestOutcome {
        match self.ingest(method, token, body) {
            Ok(()) => IngestOutcome::success(),
            Err(e) => {
                if e.is_client_error() {
                    warn!(status = e.status_code().as_u16(), error = %e, "snapshot rejected");
                } else {
                    warn!(error = ?e, "snapshot could not be persisted");
                }
                e.into()
            }
        }
    }

    /// Validate in order (method, token presence, token match, body) and
    /// replace the persisted snapshot. Nothing is written unless every
    /// check passes.
    pub fn ingest(
        &self,
        method: &Method,
        token: Option<&str>,
        body: &[u8],
    ) -> Result<(), IngestError> {
        self.authorize(method, token)?;

        if body.is_empty() {
            return Err(IngestError::EmptyBody);
        }
        serde_json::from_slice::<serde::de::IgnoredAny>(body)
            .map_err(IngestError::MalformedJson)?;

        self.store.replace(body)?;
        info!(bytes = body.len(), "snapshot ingested");
        Ok(())
    }

    /// The method and token checks alone, so a server can reject a request
    /// before reading its body.
    pub fn authorize(&self, method: &Method, token: Option<&str>) -> Result<(), IngestError> {
        if *method != Method::POST {
            return Err(IngestError::MethodNotAllowed);
        }

        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(IngestError::MissingToken)?;
        if !constant_time_eq(token.as_bytes(), self.secret.as_bytes()) {
            return Err(IngestError::InvalidToken);
        }
        Ok(())
    }
}

/// Compare two secrets without an early exit on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
