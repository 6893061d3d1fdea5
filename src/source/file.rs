//! File-based data source.
//!
//! Reads the persisted snapshot document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use statusboard_types::Snapshot;
use tracing::debug;

use super::{parse_snapshot, DataSource};

/// Load a snapshot from `path`, never failing.
///
/// A missing or unreadable file yields an empty snapshot, exactly like an
/// empty or malformed one.
pub fn load_snapshot(path: &Path) -> Snapshot {
    match fs::read_to_string(path) {
        Ok(content) => parse_snapshot(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => Snapshot::default(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "failed to read snapshot");
            Snapshot::default()
        }
    }
}

/// A data source that polls a snapshot file.
///
/// The source tracks the file's modification time and only returns new
/// data when it changed. A file that disappears counts as a change and
/// yields an empty snapshot.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    polled: bool,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            polled: false,
            last_modified: None,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<Snapshot> {
        let current_modified = self.modified_time();

        if self.polled && current_modified == self.last_modified {
            return None;
        }

        self.polled = true;
        self.last_modified = current_modified;
        Some(load_snapshot(&self.path))
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn reset(&mut self) {
        self.polled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn sample_json() -> &'static str {
        r#"{
            "bots": [{"name": "Bot1", "status": "Online"}],
            "websites": [{"name": "Site1", "status": "Partial Outage", "url": "https://x.test"}]
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/status.json");
        assert_eq!(source.path(), Path::new("/tmp/status.json"));
        assert_eq!(source.description(), "file: /tmp/status.json");
    }

    #[test]
    fn test_file_source_poll_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.len(), 2);

        // Second poll without file change should return None
        assert!(source.poll().is_none());

        // Reset forces a fresh read
        source.reset();
        assert!(source.poll().is_some());
    }

    #[test]
    fn test_file_source_missing_file_is_empty() {
        let mut source = FileSource::new("/nonexistent/path/status.json");
        let snapshot = source.poll().unwrap();
        assert!(snapshot.is_empty());
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_detects_removal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status.json");
        fs::write(&path, sample_json()).unwrap();

        let mut source = FileSource::new(&path);
        assert_eq!(source.poll().unwrap().len(), 2);

        fs::remove_file(&path).unwrap();
        assert!(source.poll().unwrap().is_empty());
    }

    #[test]
    fn test_load_fail_soft_cases_match_absent_file() {
        let dir = TempDir::new().unwrap();
        let absent = load_snapshot(&dir.path().join("absent.json"));
        assert_eq!(absent, Snapshot::default());

        for content in ["", "{not json", "{\"bots\": [{\"name\": \"Bot1\"", "[1, 2]"] {
            let path = dir.path().join("status.json");
            fs::write(&path, content).unwrap();
            assert_eq!(load_snapshot(&path), absent, "{content:?}");
        }
    }

    #[test]
    fn test_load_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(load_snapshot(dir.path()).is_empty());
    }
}
