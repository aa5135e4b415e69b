//! Core data types for planar mapping.
//!
//! - [`Point3D`]: map point, planar by construction (z = 0)
//! - [`Translation`]: dead-reckoned 2D position of the range finder
//! - [`Scan`]: one rotation of degree-indexed range readings plus odometry
//! - [`ScanOrder`]: canonical degree iteration direction

mod pose;
mod scan;

pub use pose::{Point3D, Translation};
pub use scan::{Scan, ScanOrder};
