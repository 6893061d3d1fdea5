//! # statusboard-types
//!
//! Wire types for status snapshots. A reporter builds a [`Snapshot`] and
//! pushes it to the ingestion endpoint; the status page reads the persisted
//! document back and classifies every [`Component`].
//!
//! ## Wire format
//!
//! ```text
//! {
//!   "last_updated_utc": "2024-01-01T12:00:00+00:00",
//!   "bots":             [ {"label": "Helper", "status": "Online"} ],
//!   "websites":         [ {"label": "Docs", "status": "Online", "url": "https://docs.test"} ],
//!   "discord_services": [ {"name": "API", "status": "Operational"} ],
//!   "custom_services":  [ {"name": "Database", "status": "Maintenance"} ]
//! }
//! ```
//!
//! Every top-level key is optional. An absent group is an empty group.
//!
//! ## Features
//!
//! - `serde`: JSON serialization via serde
//! - `chrono`: stamp snapshots with the current time
//!
//! ## Example
//!
//! ```rust
//! use statusboard_types::{Group, Snapshot};
//!
//! let snapshot = Snapshot::builder()
//!     .last_updated_utc("2024-01-01T12:00:00+00:00")
//!     .bot("Helper", "Online")
//!     .website("Docs", "Partial Outage", "https://docs.test")
//!     .custom_service("Database", "Maintenance")
//!     .build();
//!
//! assert_eq!(snapshot.len(), 3);
//! assert_eq!(snapshot.group(Group::Websites)[0].display_name(), "Docs");
//! ```

mod component;
mod snapshot;

pub use component::*;
pub use snapshot::*;
