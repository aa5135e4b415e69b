//! Range-finder scan types.

use serde::{Deserialize, Serialize};

use crate::core::math::{DEGREES_PER_ROTATION, is_valid_range};

/// Direction in which degree slots are visited.
///
/// The live feed walks degrees from 359 down to 0; replay files walk 0 up to
/// 359. Both orders yield the same set of points, only emission order differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// 359 → 0 (live feed).
    #[default]
    Descending,
    /// 0 → 359 (replay files).
    Ascending,
}

impl ScanOrder {
    /// Degree indices of one full rotation in this order.
    pub fn degrees(self) -> impl Iterator<Item = usize> {
        let ascending = self == ScanOrder::Ascending;
        (0..DEGREES_PER_ROTATION).map(move |i| {
            if ascending {
                i
            } else {
                DEGREES_PER_ROTATION - 1 - i
            }
        })
    }
}

impl std::fmt::Display for ScanOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanOrder::Descending => write!(f, "descending"),
            ScanOrder::Ascending => write!(f, "ascending"),
        }
    }
}

/// One rotation of range readings plus the odometry that came with it.
///
/// `ranges[d]` is the reading at degree `d`. The array may be shorter than
/// 360 entries; missing degrees are absent rather than zero. A reading of
/// exactly zero means the beam got no return.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scan {
    /// Range readings indexed by degree.
    pub ranges: Vec<f32>,
    /// Distance traveled since the previously accepted scan.
    pub distance_traveled: f32,
    /// Heading recorded alongside the scan, if the source provides one.
    pub heading_degrees: Option<f32>,
}

impl Scan {
    /// Create a scan without a recorded heading.
    pub fn new(ranges: Vec<f32>, distance_traveled: f32) -> Self {
        Self {
            ranges,
            distance_traveled,
            heading_degrees: None,
        }
    }

    /// Attach a recorded heading.
    pub fn with_heading(mut self, heading_degrees: f32) -> Self {
        self.heading_degrees = Some(heading_degrees);
        self
    }

    /// Number of recorded degree slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if no degree slots were recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Reading at `degree`, or `None` if the slot was not recorded.
    ///
    /// Slots past 359 are never part of a rotation and are reported as absent.
    #[inline]
    pub fn reading(&self, degree: usize) -> Option<f32> {
        if degree >= DEGREES_PER_ROTATION {
            return None;
        }
        self.ranges.get(degree).copied()
    }

    /// Whether the scan reports any motion since the last accepted scan.
    #[inline]
    pub fn has_motion(&self) -> bool {
        self.distance_traveled != 0.0 && self.distance_traveled.is_finite()
    }

    /// Count readings that carry spatial information.
    pub fn valid_count(&self) -> usize {
        self.ranges
            .iter()
            .take(DEGREES_PER_ROTATION)
            .filter(|&&r| is_valid_range(r))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending_order_covers_full_rotation() {
        let degrees: Vec<usize> = ScanOrder::Descending.degrees().collect();
        assert_eq!(degrees.len(), 360);
        assert_eq!(degrees[0], 359);
        assert_eq!(degrees[359], 0);
    }

    #[test]
    fn test_ascending_order_covers_full_rotation() {
        let degrees: Vec<usize> = ScanOrder::Ascending.degrees().collect();
        assert_eq!(degrees.len(), 360);
        assert_eq!(degrees[0], 0);
        assert_eq!(degrees[359], 359);
    }

    #[test]
    fn test_reading_absent_past_recorded_length() {
        let scan = Scan::new(vec![1.0, 2.0], 0.0);
        assert_eq!(scan.reading(1), Some(2.0));
        assert_eq!(scan.reading(2), None);
    }

    #[test]
    fn test_reading_ignores_slots_past_rotation() {
        let scan = Scan::new(vec![1.0; 400], 0.0);
        assert_eq!(scan.reading(359), Some(1.0));
        assert_eq!(scan.reading(360), None);
        assert_eq!(scan.valid_count(), 360);
    }

    #[test]
    fn test_has_motion() {
        assert!(!Scan::new(vec![], 0.0).has_motion());
        assert!(Scan::new(vec![], 0.5).has_motion());
        assert!(Scan::new(vec![], -0.5).has_motion());
        assert!(!Scan::new(vec![], f32::NAN).has_motion());
    }

    #[test]
    fn test_valid_count_skips_no_return() {
        let scan = Scan::new(vec![0.0, 1.0, -2.0, f32::NAN, 3.0], 0.0);
        assert_eq!(scan.valid_count(), 2);
    }

    #[test]
    fn test_scan_order_serde_names() {
        let order: ScanOrder = serde_json::from_str("\"ascending\"").unwrap();
        assert_eq!(order, ScanOrder::Ascending);
        assert_eq!(ScanOrder::default().to_string(), "descending");
    }
}
