//! Scan feeds polled by the ingestion loop.
//!
//! A feed only has to answer two questions per poll: does data exist, and
//! did it decode. Transport details stay behind [`ScanFeed`].
//!
//! # Feeds
//!
//! | Feed | Source | Semantics |
//! |------|--------|-----------|
//! | [`JsonMailboxFeed`] | JSON file overwritten in place | re-read every poll, may be absent or half-written |
//! | [`ReplayFeed`] | `{heading,distance} [r0,...]` lines | sequential, paced, ends at EOF |

mod mailbox;
mod record;
mod replay;

use std::time::Duration;

use crate::core::types::Scan;
use crate::error::FeedError;

pub use mailbox::JsonMailboxFeed;
pub use record::ScanRecord;
pub use replay::{ReplayFeed, parse_replay_line};

/// Outcome of a successful feed poll.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedRead {
    /// The source does not exist (yet).
    Absent,
    /// Current contents decoded into a scan.
    Scan(Scan),
    /// The source has no more scans and never will.
    Exhausted,
}

/// A polled scan source.
///
/// `read` returns `Err` for transient failures (partial writes, malformed
/// lines). The ingestion loop never treats those as fatal.
pub trait ScanFeed: Send {
    /// Poll the source once.
    fn read(&mut self) -> Result<FeedRead, FeedError>;

    /// Delay to hold after each accepted scan, if the source is paced.
    fn pacing(&self) -> Option<Duration> {
        None
    }

    /// Human-readable source description for logging.
    fn describe(&self) -> String;
}
