//! Point and translation types for planar mapping.

use serde::{Deserialize, Serialize};

/// A map point in meters (or whatever unit the range finder reports).
///
/// The range finder is planar, so `z` is always zero for points produced by
/// the transformer. It is kept so snapshots can be handed to 3D viewers as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point on the mapping plane.
    #[inline]
    pub fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Dead-reckoned position of the range finder.
///
/// Heading is not part of the pose: it is supplied per scan by a
/// [`HeadingProvider`](crate::sensors::HeadingProvider). The translation only
/// moves when a scan is accepted and is never reset during a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Translation {
    pub x: f32,
    pub y: f32,
}

impl Translation {
    /// Create a new translation.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Starting position of every session.
    #[inline]
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Offset this translation by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Straight-line distance to another translation.
    #[inline]
    pub fn distance(&self, other: &Translation) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_planar_point_has_zero_z() {
        let p = Point3D::planar(1.0, 2.0);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_translation_offset() {
        let t = Translation::origin().offset(3.0, -2.0);
        assert_relative_eq!(t.x, 3.0);
        assert_relative_eq!(t.y, -2.0);
        assert_relative_eq!(t.distance(&Translation::origin()), 13.0_f32.sqrt());
    }
}
