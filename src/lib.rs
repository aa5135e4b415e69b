//! Naksha - dead-reckoning 2D point-cloud mapper
//!
//! Builds a planar point cloud from 360° range-finder scans paired with
//! distance-traveled readings. Each accepted scan is projected from the
//! current dead-reckoned translation and appended to an ever-growing map;
//! the map is handed to a render thread as immutable snapshots.
//!
//! # Architecture
//!
//! The crate is organized into 6 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      main                           │  ← Entry point
//! │              (CLI, config, threads)                 │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                io/        render/                   │  ← Infrastructure
//! │     (mailbox + replay feeds)  (slot, thread, sinks) │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    engine/                          │  ← Orchestration
//! │        (session, ingestion state machine)           │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   mapping/                          │  ← Map state
//! │      (translation tracker, accumulator, framing)    │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   sensors/                          │  ← Sensor processing
//! │          (polar conversion, heading sources)        │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                (types, math)                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use naksha::{FixedHeading, MappingSession, Scan};
//!
//! let mut session = MappingSession::default();
//! let mut heading = FixedHeading::default();
//!
//! let update = session.offer(&Scan::new(vec![5.0; 360], 0.0), &mut heading).unwrap();
//! assert_eq!(update.points_added, 360);
//!
//! // Same mailbox contents again: no motion, nothing new
//! assert!(session.offer(&Scan::new(vec![5.0; 360], 0.0), &mut heading).is_none());
//! ```

// Layer 1: Core foundation (no internal deps)
pub mod core;

// Layer 2: Sensor processing (depends on core)
pub mod sensors;

// Layer 3: Map state (depends on core)
pub mod mapping;

// Layer 4: Infrastructure (depends on core, mapping)
pub mod io;
pub mod render;

// Layer 5: Orchestration (depends on all of the above)
pub mod engine;

pub mod config;
pub mod error;
pub mod utils;

pub use config::NakshaConfig;
pub use core::types::{Point3D, Scan, ScanOrder, Translation};
pub use engine::{
    AcceptancePolicy, IngestionConfig, IngestionLoop, IngestionState, IngestionStats,
    MappingSession, PollOutcome, RetryPolicy, ScanUpdate,
};
pub use error::{ConfigError, Error, FeedError, RenderError, Result};
pub use io::feed::{FeedRead, JsonMailboxFeed, ReplayFeed, ScanFeed};
pub use mapping::{CameraConvention, CameraFraming, MapAccumulator, MapSnapshot, TranslationTracker};
pub use render::{
    FramePublisher, FrameReceiver, LogRenderSink, RenderFrame, RenderSink, RenderThread,
    SvgRenderSink, SvgSettings, frame_slot,
};
pub use sensors::{CoordinateTransformer, FixedHeading, HeadingProvider, RecordedHeading};
