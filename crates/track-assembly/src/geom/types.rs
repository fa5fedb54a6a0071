//! Plain geometric snapshots consumed by the assembly.
//!
//! - `Wheel`: wrap-plane center and effective radius.
//! - `ShoeSpec`: link pitch and height, shared by every link of the chain.
//! - `TrackGeometry`: the complete, immutable input of one assembly run.

use nalgebra::Vector2;

use super::cfg::{effective_radius, ClearanceCfg};
use crate::assembly::AssemblyError;

/// Which wheel a value belongs to (used in diagnostics).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelRole {
    Drive,
    Idler,
    Support(usize),
}

impl std::fmt::Display for WheelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WheelRole::Drive => write!(f, "drive wheel"),
            WheelRole::Idler => write!(f, "idler"),
            WheelRole::Support(i) => write!(f, "support wheel #{i}"),
        }
    }
}

/// Wheel in the wrap plane. `radius` is the effective (clearance-inflated) radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wheel {
    pub center: Vector2<f64>,
    pub radius: f64,
}

impl Wheel {
    #[inline]
    pub fn new(center: Vector2<f64>, radius: f64) -> Self {
        Self { center, radius }
    }
    /// Lowest point of the wheel circle.
    #[inline]
    pub fn bottom(&self) -> Vector2<f64> {
        Vector2::new(self.center.x, self.center.y - self.radius)
    }
    #[inline]
    pub fn top(&self) -> Vector2<f64> {
        Vector2::new(self.center.x, self.center.y + self.radius)
    }
}

/// Link dimensions: center-to-center connector distance and link height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShoeSpec {
    pub pitch: f64,
    pub height: f64,
}

/// Immutable input of one assembly run.
///
/// Invariants (checked by `validate`):
/// - at least one support wheel;
/// - all coordinates finite, all radii and the pitch strictly positive;
/// - shoe height finite and non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackGeometry {
    pub drive: Wheel,
    pub idler: Wheel,
    pub supports: Vec<Wheel>,
    pub shoe: ShoeSpec,
    /// Out-of-plane chassis coordinate of the drive wheel; poses lifted to 3D use it.
    pub lateral: f64,
}

impl TrackGeometry {
    /// Build from wrap-plane centers and raw radii, inflating radii per `clearance`.
    pub fn from_raw(
        drive: Wheel,
        idler: Wheel,
        supports: &[Wheel],
        shoe: ShoeSpec,
        clearance: &ClearanceCfg,
    ) -> Self {
        let inflate = |w: &Wheel, frac: f64| Wheel {
            center: w.center,
            radius: effective_radius(w.radius, shoe.height, frac),
        };
        Self {
            drive: inflate(&drive, clearance.drive),
            idler: inflate(&idler, clearance.idler),
            supports: supports
                .iter()
                .map(|w| inflate(w, clearance.support))
                .collect(),
            shoe,
            lateral: 0.0,
        }
    }

    /// Check the preconditions of an assembly run; reports the first violation.
    pub fn validate(&self) -> Result<(), AssemblyError> {
        if self.supports.is_empty() {
            return Err(AssemblyError::NoSupportWheels);
        }
        if !self.shoe.pitch.is_finite() {
            return Err(AssemblyError::NonFinite { what: "pitch" });
        }
        if self.shoe.pitch <= 0.0 {
            return Err(AssemblyError::NonPositivePitch {
                pitch: self.shoe.pitch,
            });
        }
        if !self.shoe.height.is_finite() || self.shoe.height < 0.0 {
            return Err(AssemblyError::NegativeHeight {
                height: self.shoe.height,
            });
        }
        if !self.lateral.is_finite() {
            return Err(AssemblyError::NonFinite {
                what: "lateral offset",
            });
        }
        check_wheel(&self.drive, WheelRole::Drive)?;
        check_wheel(&self.idler, WheelRole::Idler)?;
        for (i, w) in self.supports.iter().enumerate() {
            check_wheel(w, WheelRole::Support(i))?;
        }
        Ok(())
    }
}

fn check_wheel(w: &Wheel, role: WheelRole) -> Result<(), AssemblyError> {
    if !(w.center.x.is_finite() && w.center.y.is_finite()) {
        return Err(AssemblyError::NonFinite {
            what: "wheel center",
        });
    }
    if !w.radius.is_finite() || w.radius <= 0.0 {
        return Err(AssemblyError::NonPositiveRadius {
            role,
            radius: w.radius,
        });
    }
    Ok(())
}
