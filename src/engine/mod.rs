//! Mapping engine.
//!
//! Ties the feed, the transformer, the tracker and the accumulator together.
//!
//! # Contents
//!
//! - [`session`]: [`MappingSession`], the caller-owned mapping state
//! - [`retry`]: [`RetryPolicy`] for transient decode failures
//! - [`ingestion`]: [`IngestionLoop`], the polling state machine

pub mod ingestion;
pub mod retry;
pub mod session;

pub use ingestion::{IngestionConfig, IngestionLoop, IngestionState, IngestionStats, PollOutcome};
pub use retry::RetryPolicy;
pub use session::{AcceptancePolicy, MappingSession, ScanUpdate};
