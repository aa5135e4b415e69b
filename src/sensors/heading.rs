//! Heading sources for dead reckoning.
//!
//! The tracker needs to know which way the robot moved between two scans.
//! The live feed carries no heading at all, so the robot is assumed to drive
//! straight "forward" at a fixed heading. Replay files record a heading per
//! line and can use it directly.

use crate::core::types::Scan;

/// Heading that means "straight ahead" in the map frame (+Y).
pub const FORWARD_HEADING_DEG: f32 = 90.0;

/// Supplies the heading, in degrees counter-clockwise from +X, that the
/// robot held while traveling `scan.distance_traveled`.
pub trait HeadingProvider: Send {
    /// Heading for the motion reported with `scan`.
    fn heading_degrees(&mut self, scan: &Scan) -> f32;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// Constant heading, independent of the scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedHeading {
    degrees: f32,
}

impl FixedHeading {
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }
}

impl Default for FixedHeading {
    fn default() -> Self {
        Self::new(FORWARD_HEADING_DEG)
    }
}

impl HeadingProvider for FixedHeading {
    fn heading_degrees(&mut self, _scan: &Scan) -> f32 {
        self.degrees
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Uses the heading recorded with each scan, falling back to a constant when
/// the scan has none (or a non-finite one).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedHeading {
    fallback: FixedHeading,
}

impl RecordedHeading {
    pub fn new(fallback_degrees: f32) -> Self {
        Self {
            fallback: FixedHeading::new(fallback_degrees),
        }
    }
}

impl Default for RecordedHeading {
    fn default() -> Self {
        Self {
            fallback: FixedHeading::default(),
        }
    }
}

impl HeadingProvider for RecordedHeading {
    fn heading_degrees(&mut self, scan: &Scan) -> f32 {
        match scan.heading_degrees {
            Some(h) if h.is_finite() => h,
            _ => self.fallback.heading_degrees(scan),
        }
    }

    fn name(&self) -> &'static str {
        "recorded"
    }
}
