//! Camera framing for displaying a snapshot.
//!
//! The viewer is pointed at the center of the map's bounding box and zoomed
//! so the largest extent fits: `zoom = 2 / max(extent)`. Orientation comes
//! from a fixed [`CameraConvention`].

use serde::{Deserialize, Serialize};

use crate::core::types::Point3D;
use crate::mapping::accumulator::MapSnapshot;

/// Extents at or below this are treated as a single point.
const DEGENERATE_EXTENT: f32 = 1e-6;

/// Zoom used when the bounding box has no size.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3D,
    pub max: Point3D,
}

impl BoundingBox {
    /// Bounds of `points`, `None` if there are none.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3D>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.min.z = bounds.min.z.min(p.z);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
            bounds.max.z = bounds.max.z.max(p.z);
        }
        Some(bounds)
    }

    pub fn center(&self) -> Point3D {
        Point3D::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Size along each axis.
    pub fn extent(&self) -> [f32; 3] {
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }

    pub fn max_extent(&self) -> f32 {
        self.extent().into_iter().fold(0.0, f32::max)
    }
}

/// Fixed camera orientation.
///
/// The live feed and replay viewers use different orientations; both are
/// available and selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraConvention {
    /// front = +Y, up = +Z. Paired with the live feed.
    #[default]
    Forward,
    /// front = -Z, up = +Y. Paired with replay files.
    Overhead,
}

impl CameraConvention {
    pub fn front(self) -> [f32; 3] {
        match self {
            CameraConvention::Forward => [0.0, 1.0, 0.0],
            CameraConvention::Overhead => [0.0, 0.0, -1.0],
        }
    }

    pub fn up(self) -> [f32; 3] {
        match self {
            CameraConvention::Forward => [0.0, 0.0, 1.0],
            CameraConvention::Overhead => [0.0, 1.0, 0.0],
        }
    }
}

impl std::fmt::Display for CameraConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraConvention::Forward => write!(f, "forward"),
            CameraConvention::Overhead => write!(f, "overhead"),
        }
    }
}

/// Viewer parameters that fit a whole snapshot on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub look_at: Point3D,
    pub front: [f32; 3],
    pub up: [f32; 3],
    pub zoom: f32,
    /// Bounds the framing was computed from.
    pub bounds: BoundingBox,
}

impl CameraFraming {
    /// Frame `bounds` with the given orientation.
    pub fn fit(bounds: BoundingBox, convention: CameraConvention) -> Self {
        let max_extent = bounds.max_extent();
        let zoom = if max_extent > DEGENERATE_EXTENT {
            2.0 / max_extent
        } else {
            DEFAULT_ZOOM
        };

        Self {
            look_at: bounds.center(),
            front: convention.front(),
            up: convention.up(),
            zoom,
            bounds,
        }
    }

    /// Frame a snapshot, `None` if it has no points.
    pub fn for_snapshot(snapshot: &MapSnapshot, convention: CameraConvention) -> Option<Self> {
        snapshot
            .bounding_box()
            .map(|bounds| Self::fit(bounds, convention))
    }
}
