//! Persisted snapshot storage.
//!
//! A single JSON document on disk. Writers are serialized by a lock and
//! replace the document atomically; readers never take the lock.

use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use statusboard_types::Snapshot;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::StoreError;
use crate::source::load_snapshot;

/// Owner of the persisted snapshot document.
///
/// `replace` writes the new document to a temporary file in the same
/// directory, syncs it, and renames it over the target. A concurrent reader
/// therefore sees either the complete previous document or the complete new
/// one. A failed replace leaves the previous document as it was.
#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current snapshot. Never fails and never blocks on writers.
    pub fn load(&self) -> Snapshot {
        load_snapshot(&self.path)
    }

    /// Replace the persisted document with `document`, byte for byte.
    pub fn replace(&self, document: &[u8]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let parent = self.parent_dir();

        let mut temp_file = NamedTempFile::new_in(parent).map_err(StoreError::TempFile)?;
        temp_file.write_all(document).map_err(StoreError::Write)?;
        temp_file.as_file().sync_all().map_err(StoreError::Write)?;
        temp_file
            .persist(&self.path)
            .map_err(|e| StoreError::Persist(e.error))?;

        // Fsync parent directory for durability (Unix only)
        #[cfg(unix)]
        {
            if let Ok(dir) = std::fs::File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        info!(path = %self.path.display(), bytes = document.len(), "snapshot replaced");
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}
