//! Website probing.
//!
//! A probe issues a GET and turns the outcome into the status text a
//! snapshot carries for a website: `Online` for any 2xx answer,
//! `Status <code>` for other answers, `Offline` when nothing answered.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use statusboard_types::Snapshot;
use tracing::{debug, info};

/// Result of probing one website.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Status text to publish for the website.
    pub status: String,
    /// Whether the site answered with a success status.
    pub online: bool,
}

impl ProbeOutcome {
    fn offline() -> Self {
        Self {
            status: "Offline".to_string(),
            online: false,
        }
    }

    fn from_status(code: StatusCode) -> Self {
        if code.is_success() {
            Self {
                status: "Online".to_string(),
                online: true,
            }
        } else {
            Self {
                status: format!("Status {}", code.as_u16()),
                online: false,
            }
        }
    }
}

/// Probes websites with a shared HTTP client.
#[derive(Debug, Clone)]
pub struct WebsiteProbe {
    client: Client,
}

impl WebsiteProbe {
    /// Probe with the default 10 second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }

    /// Probe with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        // Building only fails when the TLS backend cannot initialise; fall
        // back to a default client, which has no timeout but still works.
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Probe a single URL. Never fails: transport errors map to `Offline`.
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.client.get(url).send().await {
            Ok(response) => ProbeOutcome::from_status(response.status()),
            Err(e) => {
                debug!(%url, error = %e, "website probe failed");
                ProbeOutcome::offline()
            }
        }
    }

    /// Probe every website in `snapshot` that has a URL and overwrite its
    /// status with the result. Returns how many sites were probed.
    ///
    /// Sites are probed one after another; websites without a URL keep the
    /// status they were given.
    pub async fn refresh_websites(&self, snapshot: &mut Snapshot) -> usize {
        let mut probed = 0;
        for site in snapshot.websites.iter_mut() {
            let Some(url) = site.url.as_deref() else {
                continue;
            };
            let outcome = self.probe(url).await;
            info!(site = site.display_name(), %url, status = %outcome.status, "website probed");
            site.status = outcome.status;
            probed += 1;
        }
        probed
    }
}

impl Default for WebsiteProbe {
    fn default() -> Self {
        Self::new()
    }
}
