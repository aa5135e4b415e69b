//! Dead-reckoning translation tracker.
//!
//! ```text
//! x' = x + distance * cos(heading)
//! y' = y + distance * sin(heading)
//! ```
//!
//! No correction is ever applied, so error accumulates with distance.

use crate::core::math::heading_unit;
use crate::core::types::Translation;

/// Integrates distance-traveled readings into a translation.
pub struct TranslationTracker;

impl TranslationTracker {
    /// Advance `translation` by `distance_traveled` along `heading_degrees`.
    ///
    /// Zero distance returns the input unchanged for any heading. A
    /// non-finite distance is treated as no motion.
    pub fn advance(
        translation: &Translation,
        distance_traveled: f32,
        heading_degrees: f32,
    ) -> Translation {
        if distance_traveled == 0.0 {
            return *translation;
        }
        if !distance_traveled.is_finite() || !heading_degrees.is_finite() {
            log::warn!(
                "Ignoring non-finite motion (distance={}, heading={})",
                distance_traveled,
                heading_degrees
            );
            return *translation;
        }

        let (cos, sin) = heading_unit(heading_degrees);
        translation.offset(distance_traveled * cos, distance_traveled * sin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_forward_heading() {
        let t = TranslationTracker::advance(&Translation::origin(), 10.0, 90.0);
        assert_relative_eq!(t.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(t.y, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_distance_is_identity_for_any_heading() {
        let start = Translation::new(1.25, -3.5);
        for heading in [0.0, 45.0, 90.0, 137.5, 270.0, -30.0, 720.0] {
            assert_eq!(TranslationTracker::advance(&start, 0.0, heading), start);
        }
    }

    #[test]
    fn test_advance_accumulates() {
        let mut t = Translation::origin();
        for _ in 0..4 {
            t = TranslationTracker::advance(&t, 2.5, 0.0);
        }
        assert_relative_eq!(t.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(t.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_negative_distance_moves_backwards() {
        let t = TranslationTracker::advance(&Translation::origin(), -1.0, 90.0);
        assert_relative_eq!(t.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_non_finite_motion_ignored() {
        let start = Translation::new(2.0, 2.0);
        assert_eq!(TranslationTracker::advance(&start, f32::NAN, 90.0), start);
        assert_eq!(TranslationTracker::advance(&start, 1.0, f32::INFINITY), start);
    }
}
