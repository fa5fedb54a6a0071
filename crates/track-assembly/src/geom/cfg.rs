//! Clearance fractions and tolerance defaults.
//!
//! Policy
//! - Radii are inflated by a fraction of the shoe height so links clear the
//!   wheel surface. The fractions are empirical; defaults live here as named
//!   constants and callers override them through `ClearanceCfg`.

/// Drive wheel radius is taken as the gear's assembly radius (no inflation).
pub const DRIVE_CLEARANCE: f64 = 0.0;
/// Idler radius inflation, as a fraction of shoe height.
pub const IDLER_CLEARANCE: f64 = 1.0;
/// Support (road) wheel radius inflation, as a fraction of shoe height.
pub const SUPPORT_CLEARANCE: f64 = 0.9;
/// Relative tolerance on link length and loop closure, in units of pitch.
pub const PITCH_EPS: f64 = 1e-9;

/// Clearance fractions applied when turning raw wheel radii into effective radii.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearanceCfg {
    pub drive: f64,
    pub idler: f64,
    pub support: f64,
}

impl Default for ClearanceCfg {
    fn default() -> Self {
        Self {
            drive: DRIVE_CLEARANCE,
            idler: IDLER_CLEARANCE,
            support: SUPPORT_CLEARANCE,
        }
    }
}

impl ClearanceCfg {
    /// No inflation on any wheel.
    pub fn none() -> Self {
        Self {
            drive: 0.0,
            idler: 0.0,
            support: 0.0,
        }
    }
}

/// `raw + fraction · height`.
#[inline]
pub fn effective_radius(raw: f64, height: f64, fraction: f64) -> f64 {
    raw + fraction * height
}
