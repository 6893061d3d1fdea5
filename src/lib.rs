//! # statusboard
//!
//! A minimal status-page publisher. A reporter pushes a JSON snapshot of its
//! components' health to an authenticated endpoint; the page reads the
//! latest snapshot, classifies every component and derives one overall
//! status.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  POST ?token=  ┌──────────┐ atomic  ┌───────────────┐
//! │ reporter │───────────────▶│  ingest  │────────▶│     store     │
//! └──────────┘                └──────────┘ replace │ (status.json) │
//!                                                  └───────┬───────┘
//!                                                          │ fail-soft load
//!                                                          ▼
//!      ┌─────────┐   ┌─────────┐   ┌──────────────┐   ┌─────────┐
//!      │ viewer  │◀──│ web/tui │◀──│ data::Board  │◀──│ source  │
//!      └─────────┘   └─────────┘   └──────────────┘   └─────────┘
//! ```
//!
//! - **[`data`]**: severity classification, overall status, render-ready [`Board`]
//! - **[`source`]**: the never-failing snapshot loader and the [`DataSource`] trait
//! - **[`store`]**: single-writer atomic replacement of the snapshot document
//! - **[`ingest`]**: method, token and body validation for submissions
//! - **[`server`]**: hyper HTTP server exposing ingestion, the page and JSON
//! - **[`web`]**: the HTML page
//! - **[`app`]**, **[`events`]**, **[`ui`]**: the terminal dashboard
//!
//! ## Usage
//!
//! ```bash
//! # Serve the page and accept snapshots at /api/status?token=...
//! statusboard serve --token change-me --snapshot status.json
//!
//! # Push a snapshot, probing each website URL first
//! statusboard push --file snapshot.json --token change-me --probe-websites
//!
//! # Watch the snapshot file in the terminal
//! statusboard watch --snapshot status.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use statusboard::{Board, OverallStatus, Snapshot};
//!
//! let snapshot = Snapshot::builder()
//!     .bot("Bot1", "Online")
//!     .website("Site1", "Partial Outage", "https://x.test")
//!     .build();
//!
//! let board = Board::from_snapshot(&snapshot);
//! assert_eq!(board.overall, OverallStatus::PartialDisruption);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod ingest;
pub mod server;
pub mod source;
pub mod store;
pub mod telemetry;
pub mod ui;
pub mod web;

// Re-export main types for convenience
pub use app::{App, View};
pub use config::{PageSettings, Settings};
pub use data::{Board, Entry, GroupView, OverallStatus, Severity, StatusIcon, Tone};
pub use error::{IngestError, StoreError};
pub use ingest::{IngestOutcome, Ingestor};
pub use source::{load_snapshot, parse_snapshot, DataSource, FileSource};
pub use statusboard_types::{Component, Group, Snapshot, SnapshotBuilder};
pub use store::SnapshotStore;
