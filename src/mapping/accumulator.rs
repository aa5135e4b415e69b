//! Append-only point-cloud map.
//!
//! Points are stored behind an [`Arc`] so a [`MapSnapshot`] is a cheap handle
//! that can be sent to the render thread. Appending while a snapshot is alive
//! copies the buffer first (copy-on-write), so a snapshot keeps showing the
//! prefix of appends that existed when it was taken.
//!
//! Growth is unbounded: nothing is ever deduplicated, downsampled or evicted.

use std::sync::Arc;

use crate::core::types::Point3D;
use crate::mapping::framing::BoundingBox;

/// Owner of the accumulated map.
#[derive(Debug, Default)]
pub struct MapAccumulator {
    points: Arc<Vec<Point3D>>,
    total_appends: u64,
}

impl MapAccumulator {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of points, returning how many were added.
    pub fn append<I>(&mut self, points: I) -> usize
    where
        I: IntoIterator<Item = Point3D>,
    {
        let storage = Arc::make_mut(&mut self.points);
        let before = storage.len();
        storage.extend(points);
        self.total_appends += 1;
        storage.len() - before
    }

    /// Immutable view of the map as it is right now.
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            points: Arc::clone(&self.points),
        }
    }

    /// Number of points in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the map has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of appends so far (including empty ones).
    #[inline]
    pub fn total_appends(&self) -> u64 {
        self.total_appends
    }
}

/// Immutable, thread-safe view of the map at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSnapshot {
    points: Arc<Vec<Point3D>>,
}

impl MapSnapshot {
    /// Points in append order.
    #[inline]
    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3D> {
        self.points.iter()
    }

    /// Axis-aligned bounds of every point, `None` for an empty map.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(n: usize, offset: f32) -> Vec<Point3D> {
        (0..n).map(|i| Point3D::planar(i as f32 + offset, offset)).collect()
    }

    #[test]
    fn test_append_is_additive() {
        let mut map = MapAccumulator::new();
        let sizes = [3usize, 0, 7, 360, 1];
        let mut expected = 0;
        for (i, &k) in sizes.iter().enumerate() {
            let added = map.append(batch(k, i as f32));
            assert_eq!(added, k);
            expected += k;
            assert_eq!(map.len(), expected);
        }
        assert_eq!(map.total_appends(), sizes.len() as u64);
    }

    #[test]
    fn test_snapshot_is_stable_prefix() {
        let mut map = MapAccumulator::new();
        map.append(batch(4, 0.0));
        let before = map.snapshot();

        map.append(batch(2, 10.0));
        let after = map.snapshot();

        assert_eq!(before.len(), 4);
        assert_eq!(after.len(), 6);
        assert_eq!(&after.points()[..4], before.points());
    }

    #[test]
    fn test_existing_points_never_mutated() {
        let mut map = MapAccumulator::new();
        map.append(batch(3, 1.0));
        let first: Vec<Point3D> = map.snapshot().points().to_vec();

        for i in 0..10 {
            map.append(batch(5, 100.0 + i as f32));
        }
        assert_eq!(&map.snapshot().points()[..3], first.as_slice());
    }

    #[test]
    fn test_snapshot_sendable_across_threads() {
        let mut map = MapAccumulator::new();
        map.append(batch(10, 0.0));
        let snapshot = map.snapshot();

        let handle = std::thread::spawn(move || snapshot.len());
        map.append(batch(10, 0.0));

        assert_eq!(handle.join().unwrap(), 10);
        assert_eq!(map.len(), 20);
    }

    #[test]
    fn test_empty_snapshot_has_no_bounds() {
        let map = MapAccumulator::new();
        assert!(map.snapshot().is_empty());
        assert!(map.snapshot().bounding_box().is_none());
    }
}
