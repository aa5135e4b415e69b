//! Scan conversion from polar readings to map-frame points.
//!
//! Each degree slot of a [`Scan`] is projected from the current
//! [`Translation`]:
//!
//! ```text
//! x = range * cos(degree) + translation.x
//! y = range * sin(degree) + translation.y
//! z = 0
//! ```
//!
//! The range finder's own rotation is not applied; points are laid out in the
//! fixed map frame.

use crate::core::math::{is_valid_range, polar_offset};
use crate::core::types::{Point3D, Scan, ScanOrder, Translation};

/// Polar-to-Cartesian converter with an explicit degree iteration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinateTransformer {
    order: ScanOrder,
}

impl CoordinateTransformer {
    /// Create a transformer that walks degrees in `order`.
    pub fn new(order: ScanOrder) -> Self {
        Self { order }
    }

    /// Degree iteration order.
    pub fn order(&self) -> ScanOrder {
        self.order
    }

    /// Convert a scan to points relative to `translation`.
    ///
    /// Degrees not recorded in the scan and readings without spatial
    /// information (zero, negative, non-finite) produce no point. Output
    /// order follows [`ScanOrder`].
    pub fn transform(&self, scan: &Scan, translation: &Translation) -> Vec<Point3D> {
        let mut points = Vec::with_capacity(scan.len().min(360));

        for degree in self.order.degrees() {
            let Some(range) = scan.reading(degree) else {
                continue;
            };
            if !is_valid_range(range) {
                continue;
            }

            let (dx, dy) = polar_offset(range, degree as f32);
            points.push(Point3D::planar(dx + translation.x, dy + translation.y));
        }

        points
    }

    /// Number of points [`transform`](Self::transform) would emit for `scan`.
    #[inline]
    pub fn valid_reading_count(&self, scan: &Scan) -> usize {
        scan.valid_count()
    }
}
