//! Snapshot loading.
//!
//! Reading never fails: a missing, empty, truncated or malformed document is
//! indistinguishable from "no report received yet" and yields an empty
//! [`Snapshot`]. Unexpected shapes inside a group are tolerated per component.

mod file;
mod parse;

pub use file::{load_snapshot, FileSource};
pub use parse::parse_snapshot;

use std::fmt::Debug;

use statusboard_types::Snapshot;

/// Trait for receiving snapshots from a source.
///
/// # Example
///
/// ```
/// use statusboard::{DataSource, FileSource};
///
/// let mut source = FileSource::new("status.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} components", snapshot.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if the data changed since the last poll,
    /// `None` otherwise. This method should be non-blocking.
    fn poll(&mut self) -> Option<Snapshot>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Forget what was seen so the next poll returns data unconditionally.
    fn reset(&mut self) {}
}
