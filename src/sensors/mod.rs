//! Sensor processing layer.
//!
//! Turns raw range-finder scans into map-frame points and decides which
//! heading the robot was facing when a scan was taken.
//!
//! # Contents
//!
//! - [`converter`]: [`CoordinateTransformer`], polar scan → Cartesian points
//! - [`heading`]: [`HeadingProvider`] implementations

pub mod converter;
pub mod heading;

pub use converter::CoordinateTransformer;
pub use heading::{FixedHeading, HeadingProvider, RecordedHeading};
