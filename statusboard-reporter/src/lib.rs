//! # statusboard-reporter
//!
//! Client side of statusboard: build a [`Snapshot`], probe websites for a
//! status string, and push the result to an ingestion endpoint.
//!
//! The endpoint authenticates with a shared secret passed as the `token`
//! query parameter. The whole snapshot replaces whatever was published
//! before, so a reporter always sends every component it knows about.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use statusboard_reporter::{Reporter, Snapshot, WebsiteProbe};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let probe = WebsiteProbe::new();
//!     let docs = probe.probe("https://docs.example.com").await;
//!
//!     let snapshot = Snapshot::builder()
//!         .updated_now()
//!         .bot("Helper", "Online")
//!         .website("Docs", docs.status, "https://docs.example.com")
//!         .build();
//!
//!     let reporter = Reporter::builder()
//!         .endpoint("https://status.example.com/api/status")
//!         .token("s3cret")
//!         .build()?;
//!
//!     reporter.push(&snapshot).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod probe;
pub mod reporter;

pub use error::ReportError;
pub use probe::{ProbeOutcome, WebsiteProbe};
pub use reporter::{Reporter, ReporterBuilder};

// Re-export types for convenience
pub use statusboard_types::{Component, Group, Snapshot, SnapshotBuilder};
