//! JSON mailbox feed.
//!
//! The producer overwrites a single JSON file in place. Every poll re-reads
//! the whole file; there is no acknowledgment, so a scan overwritten between
//! two polls is simply never seen.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{FeedRead, ScanFeed, ScanRecord};
use crate::error::FeedError;

/// Feed backed by a continuously overwritten JSON file.
#[derive(Debug, Clone)]
pub struct JsonMailboxFeed {
    path: PathBuf,
}

impl JsonMailboxFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScanFeed for JsonMailboxFeed {
    fn read(&mut self) -> Result<FeedRead, FeedError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FeedRead::Absent),
            Err(e) => return Err(e.into()),
        };

        let record = ScanRecord::from_json(&text)?;
        Ok(FeedRead::Scan(record.into()))
    }

    fn describe(&self) -> String {
        format!("mailbox {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_file() {
        let dir = TempDir::new().unwrap();
        let mut feed = JsonMailboxFeed::new(dir.path().join("lidar_scans.json"));
        assert_eq!(feed.read().unwrap(), FeedRead::Absent);
    }

    #[test]
    fn test_reads_current_contents_every_poll() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lidar_scans.json");
        let mut feed = JsonMailboxFeed::new(&path);

        fs::write(&path, r#"{"car_distance": 0, "scans": [1, 2]}"#).unwrap();
        let FeedRead::Scan(first) = feed.read().unwrap() else {
            panic!("expected scan");
        };
        assert_eq!(first.ranges, vec![1.0, 2.0]);

        // Same contents are reported again: the mailbox has no cursor
        let FeedRead::Scan(again) = feed.read().unwrap() else {
            panic!("expected scan");
        };
        assert_eq!(again, first);

        fs::write(&path, r#"{"car_distance": 0.5, "scans": [3]}"#).unwrap();
        let FeedRead::Scan(second) = feed.read().unwrap() else {
            panic!("expected scan");
        };
        assert_eq!(second.distance_traveled, 0.5);
    }

    #[test]
    fn test_truncated_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lidar_scans.json");
        fs::write(&path, r#"{"car_distance": 0.5, "sca"#).unwrap();

        let mut feed = JsonMailboxFeed::new(&path);
        assert!(matches!(feed.read(), Err(FeedError::Decode(_))));
    }

    #[test]
    fn test_mailbox_is_not_paced() {
        let feed = JsonMailboxFeed::new("lidar_scans.json");
        assert!(feed.pacing().is_none());
        assert!(feed.describe().contains("lidar_scans.json"));
    }
}
