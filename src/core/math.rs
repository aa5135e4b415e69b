//! Mathematical primitives for planar dead reckoning.
//!
//! Angles arrive from the feed in degrees; everything here converts once and
//! works in radians internally.

/// Number of degree slots in a full range-finder rotation.
pub const DEGREES_PER_ROTATION: usize = 360;

/// Unit vector for a heading given in degrees.
///
/// Returns `(cos, sin)` of the heading, counter-clockwise from +X.
///
/// # Example
/// ```
/// use naksha::core::math::heading_unit;
///
/// let (cx, sy) = heading_unit(90.0);
/// assert!(cx.abs() < 1e-6);
/// assert!((sy - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn heading_unit(degrees: f32) -> (f32, f32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (cos, sin)
}

/// Offset of a polar reading from its origin: `(r·cos θ, r·sin θ)`.
#[inline]
pub fn polar_offset(range: f32, degrees: f32) -> (f32, f32) {
    let (cos, sin) = heading_unit(degrees);
    (range * cos, range * sin)
}

/// A range reading that carries spatial information.
///
/// Zero means "no return"; negative and non-finite values are treated as
/// sensor garbage and dropped the same way.
#[inline]
pub fn is_valid_range(range: f32) -> bool {
    range.is_finite() && range > 0.0
}
