//! Line-oriented replay feed for offline runs.
//!
//! Each line holds one scan:
//!
//! ```text
//! {heading,distance_traveled} [r0,r1,...,r359]
//! ```
//!
//! Lines are consumed in order and never re-read. Blank lines are skipped;
//! malformed lines are reported once and skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use super::{FeedRead, ScanFeed};
use crate::core::types::Scan;
use crate::error::FeedError;

/// Default delay between replayed scans.
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

/// Sequential feed over a recorded scan file.
pub struct ReplayFeed {
    reader: Box<dyn BufRead + Send>,
    source: String,
    pacing: Option<Duration>,
    line_number: usize,
    scans_read: u64,
}

impl ReplayFeed {
    /// Open a replay file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self::from_reader(
            BufReader::new(file),
            path.display().to_string(),
        ))
    }

    /// Replay from any buffered reader.
    pub fn from_reader(reader: impl BufRead + Send + 'static, source: impl Into<String>) -> Self {
        Self {
            reader: Box::new(reader),
            source: source.into(),
            pacing: Some(DEFAULT_PACING),
            line_number: 0,
            scans_read: 0,
        }
    }

    /// Set the delay after each scan (`None` replays as fast as possible).
    pub fn with_pacing(mut self, pacing: Option<Duration>) -> Self {
        self.pacing = pacing;
        self
    }

    /// Number of lines consumed so far, blank and malformed included.
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// Number of scans successfully parsed so far.
    pub fn scans_read(&self) -> u64 {
        self.scans_read
    }
}

impl ScanFeed for ReplayFeed {
    fn read(&mut self) -> Result<FeedRead, FeedError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                log::info!(
                    "Replay {} finished: {} scans from {} lines",
                    self.source,
                    self.scans_read(),
                    self.lines_read()
                );
                return Ok(FeedRead::Exhausted);
            }
            self.line_number += 1;

            let line = std::str::from_utf8(&buf).map_err(|e| FeedError::MalformedLine {
                line: self.line_number,
                reason: format!("invalid UTF-8: {}", e),
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let scan = parse_replay_line(trimmed).map_err(|reason| FeedError::MalformedLine {
                line: self.line_number,
                reason,
            })?;
            log::debug!(
                "Replay line {}: heading={:?} distance={} readings={}",
                self.line_number,
                scan.heading_degrees,
                scan.distance_traveled,
                scan.len()
            );
            self.scans_read += 1;
            return Ok(FeedRead::Scan(scan));
        }
    }

    fn pacing(&self) -> Option<Duration> {
        self.pacing
    }

    fn describe(&self) -> String {
        format!("replay {}", self.source)
    }
}

/// Parse one `{heading,distance} [r0,...]` line.
///
/// An empty array is a valid scan with no readings.
pub fn parse_replay_line(line: &str) -> Result<Scan, String> {
    let (motion, ranges) = line
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(|| "expected `{heading,distance} [ranges]`".to_string())?;

    let motion = motion.trim_matches(|c| c == '{' || c == '}');
    let mut parts = motion.split(',');
    let (Some(heading), Some(distance)) = (parts.next(), parts.next()) else {
        return Err(format!("invalid heading/distance pair {{{}}}", motion));
    };
    let heading = parse_number(heading, "heading")?;
    let distance = parse_number(distance, "distance")?;

    let ranges = ranges.trim().trim_matches(|c| c == '[' || c == ']').trim();
    let ranges = if ranges.is_empty() {
        Vec::new()
    } else {
        ranges
            .split(',')
            .map(|r| parse_number(r, "range"))
            .collect::<Result<Vec<f32>, String>>()?
    };

    Ok(Scan::new(ranges, distance).with_heading(heading))
}

fn parse_number(text: &str, what: &str) -> Result<f32, String> {
    let text = text.trim();
    text.parse::<f32>()
        .map_err(|e| format!("invalid {} {:?}: {}", what, text, e))
}
