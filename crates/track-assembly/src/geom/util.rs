//! Inverse trigonometry with clamped arguments.
//!
//! Near-degenerate inputs (pitch close to the wheel diameter, a closing chord
//! equal to the run length) push ratios a few ulps past ±1; clamping keeps the
//! angles finite instead of turning the whole layout into NaN.

#[inline]
pub fn asin_clamped(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin()
}

#[inline]
pub fn acos_clamped(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

/// Half the angle subtended by a chord of length `pitch` on a circle of `radius`.
///
/// Pre: `radius > 0`. A pitch longer than the diameter saturates at π/2.
#[inline]
pub fn chord_half_angle(pitch: f64, radius: f64) -> f64 {
    asin_clamped(pitch / (2.0 * radius))
}
