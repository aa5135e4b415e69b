//! I/O infrastructure.
//!
//! - [`feed`]: scan sources polled by the ingestion loop

pub mod feed;

pub use feed::{FeedRead, JsonMailboxFeed, ReplayFeed, ScanFeed, ScanRecord};
