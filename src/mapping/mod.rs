//! Mapping layer.
//!
//! Owns the dead-reckoned translation and the growing point cloud, and
//! derives the camera framing a viewer needs to show the whole map.
//!
//! # Contents
//!
//! - [`tracker`]: [`TranslationTracker`], pose integration
//! - [`accumulator`]: [`MapAccumulator`] and its immutable [`MapSnapshot`]
//! - [`framing`]: [`CameraFraming`] from a snapshot's bounding box

pub mod accumulator;
pub mod framing;
pub mod tracker;

pub use accumulator::{MapAccumulator, MapSnapshot};
pub use framing::{BoundingBox, CameraConvention, CameraFraming};
pub use tracker::TranslationTracker;
