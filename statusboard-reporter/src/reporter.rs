//! Pushing snapshots to an ingestion endpoint.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Request};
use tracing::{debug, warn};

use statusboard_types::Snapshot;

use crate::ReportError;

/// Client that publishes snapshots to a statusboard ingestion endpoint.
#[derive(Debug, Clone)]
pub struct Reporter {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl Reporter {
    /// Create a new builder for configuring the reporter.
    pub fn builder() -> ReporterBuilder {
        ReporterBuilder::default()
    }

    /// The configured endpoint URL, without the token.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Serialize and push a snapshot.
    pub async fn push(&self, snapshot: &Snapshot) -> Result<(), ReportError> {
        let body = serde_json::to_vec(snapshot)?;
        self.push_raw(body).await
    }

    /// Push an already-encoded JSON document as-is.
    pub async fn push_raw(&self, body: Vec<u8>) -> Result<(), ReportError> {
        let request = self.prepare(body)?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "endpoint rejected snapshot");
            return Err(ReportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(endpoint = %self.endpoint, status = status.as_u16(), "snapshot pushed");
        Ok(())
    }

    /// Build the POST request without sending it.
    fn prepare(&self, body: Vec<u8>) -> Result<Request, ReportError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        if let Some(token) = &self.token {
            builder = builder.query(&[("token", token.as_str())]);
        }

        Ok(builder.build()?)
    }
}

/// Builder for Reporter.
#[derive(Debug, Default)]
pub struct ReporterBuilder {
    endpoint: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl ReporterBuilder {
    /// Set the ingestion endpoint (e.g., "https://status.example.com/api/status").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the shared secret sent as the `token` query parameter.
    ///
    /// An empty token is treated as no token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    /// Set the request timeout (default: 15 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the reporter.
    pub fn build(self) -> Result<Reporter, ReportError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(15));
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Reporter {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| "http://localhost:8080/api/status".to_string()),
            token: self.token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let reporter = Reporter::builder().build().unwrap();
        assert_eq!(reporter.endpoint(), "http://localhost:8080/api/status");
        assert!(reporter.token.is_none());
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let reporter = Reporter::builder().token("").build().unwrap();
        assert!(reporter.token.is_none());
    }

    #[test]
    fn test_token_appended_as_query_parameter() {
        let reporter = Reporter::builder()
            .endpoint("https://status.test/api/status")
            .token("abc 123")
            .build()
            .unwrap();

        let request = reporter.prepare(b"{}".to_vec()).unwrap();
        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().path(), "/api/status");

        let token: Vec<_> = request
            .url()
            .query_pairs()
            .filter(|(k, _)| k == "token")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(token, vec!["abc 123".to_string()]);
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_token_keeps_existing_query() {
        let reporter = Reporter::builder()
            .endpoint("https://status.test/receive?site=main")
            .token("t")
            .build()
            .unwrap();

        let request = reporter.prepare(Vec::new()).unwrap();
        assert_eq!(request.url().query(), Some("site=main&token=t"));
    }

    #[tokio::test]
    async fn test_push_to_unreachable_endpoint_fails() {
        let reporter = Reporter::builder()
            .endpoint("http://127.0.0.1:1/api/status")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        let snapshot = Snapshot::builder().bot("b", "Online").build();
        assert!(reporter.push(&snapshot).await.is_err());
    }
}
