//! Core foundation layer.
//!
//! This is the bottom layer of the mapper with no internal dependencies.
//! All other layers depend on core.
//!
//! # Contents
//!
//! - [`types`]: Core data types (points, translation, scans)
//! - [`math`]: Polar/heading primitives shared by the transformer and tracker

pub mod math;
pub mod types;
