//! Winding direction and the few mirrored operations the placement needs.
//!
//! Model
//! - All placement formulas are written for counter-clockwise winding (drive
//!   wheel ahead of the idler). Clockwise winding is the same layout reflected
//!   through the vertical axis: offsets map `x ↦ −x`, link angles `a ↦ −a`.
//! - Link angles are rotations about the chassis y axis. The unit step of a
//!   link with angle `a` is `(−sign·cos a, sign·sin a)` with `sign = −1` for
//!   counter-clockwise and `+1` for clockwise.

use nalgebra::Vector2;

use super::types::Wheel;

/// Traversal sense of the chain, fixed once per assembly run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Winding {
    /// Drive wheel ahead of the idler (larger longitudinal coordinate).
    CounterClockwise,
    /// Drive wheel behind the idler, or level with it.
    Clockwise,
}

impl Winding {
    /// Counter-clockwise iff `drive.x > idler.x`. Equal coordinates resolve to
    /// `Clockwise`.
    #[inline]
    pub fn resolve(drive: Vector2<f64>, idler: Vector2<f64>) -> Self {
        if drive.x > idler.x {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }

    #[inline]
    pub fn is_ccw(self) -> bool {
        matches!(self, Winding::CounterClockwise)
    }

    /// Traversal sign: −1 counter-clockwise, +1 clockwise.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Winding::CounterClockwise => -1.0,
            Winding::Clockwise => 1.0,
        }
    }

    /// Longitudinal coordinate in the canonical frame (points toward the drive side).
    #[inline]
    pub fn longitudinal(self, v: Vector2<f64>) -> f64 {
        -self.sign() * v.x
    }

    /// Mirrored offset: identity for counter-clockwise, `x ↦ −x` otherwise.
    #[inline]
    pub fn mirror(self, v: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(self.longitudinal(v), v.y)
    }

    /// Mirrored link angle: identity for counter-clockwise, `a ↦ −a` otherwise.
    #[inline]
    pub fn mirror_angle(self, a: f64) -> f64 {
        match self {
            Winding::CounterClockwise => a,
            Winding::Clockwise => -a,
        }
    }

    /// Unit step of a link with angle `a`.
    #[inline]
    pub fn direction(self, a: f64) -> Vector2<f64> {
        let s = self.sign();
        Vector2::new(-s * a.cos(), s * a.sin())
    }

    /// Support wheels nearest the drive wheel and nearest the idler.
    ///
    /// Pre: `supports` is non-empty. Ties keep the lowest index.
    pub fn nearest_supports(self, supports: &[Wheel]) -> NearestSupports {
        let mut drive_side = 0;
        let mut idler_side = 0;
        for (i, w) in supports.iter().enumerate().skip(1) {
            let lon = self.longitudinal(w.center);
            if lon > self.longitudinal(supports[drive_side].center) {
                drive_side = i;
            }
            if lon < self.longitudinal(supports[idler_side].center) {
                idler_side = i;
            }
        }
        NearestSupports {
            drive_side,
            idler_side,
        }
    }
}

impl std::fmt::Display for Winding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winding::CounterClockwise => write!(f, "ccw"),
            Winding::Clockwise => write!(f, "cw"),
        }
    }
}

/// Indices into the support list used as phase targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NearestSupports {
    pub drive_side: usize,
    pub idler_side: usize,
}
