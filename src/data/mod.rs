//! Classification of snapshot data.
//!
//! This module turns raw snapshot components into severity-annotated data
//! suitable for display.
//!
//! ## Submodules
//!
//! - [`severity`]: Status text classification ([`Severity`], [`StatusIcon`], [`Tone`])
//! - [`overall`]: Reduction of all severities to one [`OverallStatus`]
//! - [`board`]: The render-ready [`Board`] consumed by the page, JSON and TUI
//!
//! ## Data Flow
//!
//! ```text
//! Snapshot (persisted JSON)
//!        │
//!        ▼
//! Board::from_snapshot()
//!        │
//!        ├──▶ Entry (Severity::classify + StatusIcon::for_status per component)
//!        │
//!        └──▶ OverallStatus::resolve (early exit on first outage signal)
//! ```

pub mod board;
pub mod overall;
pub mod severity;

pub use board::{Board, Entry, GroupView};
pub use overall::OverallStatus;
pub use severity::{is_full_outage, signals_outage, Severity, StatusIcon, Tone};
