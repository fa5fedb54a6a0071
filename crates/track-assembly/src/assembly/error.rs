use std::fmt;

use crate::geom::WheelRole;

/// Precondition violations detected before any link is placed.
///
/// Geometric infeasibility (too few links to close the loop) is not an error;
/// it is reported through `Closure::Insufficient`.
#[derive(Clone, Debug, PartialEq)]
pub enum AssemblyError {
    /// The phases need at least one support wheel as a target.
    NoSupportWheels,
    /// The pose sink has no slots.
    EmptyChain,
    NonPositivePitch {
        pitch: f64,
    },
    NegativeHeight {
        height: f64,
    },
    NonPositiveRadius {
        role: WheelRole,
        radius: f64,
    },
    NonFinite {
        what: &'static str,
    },
    /// Support wheel centers and radii come in arrays of different length.
    MismatchedSupports {
        centers: usize,
        radii: usize,
    },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyError::NoSupportWheels => write!(f, "track needs at least one support wheel"),
            AssemblyError::EmptyChain => write!(f, "chain has no link slots"),
            AssemblyError::NonPositivePitch { pitch } => {
                write!(f, "link pitch must be > 0 (got {pitch})")
            }
            AssemblyError::NegativeHeight { height } => {
                write!(f, "link height must be finite and >= 0 (got {height})")
            }
            AssemblyError::NonPositiveRadius { role, radius } => {
                write!(f, "{role} radius must be finite and > 0 (got {radius})")
            }
            AssemblyError::NonFinite { what } => write!(f, "{what} is not finite"),
            AssemblyError::MismatchedSupports { centers, radii } => write!(
                f,
                "support wheels: {centers} centers but {radii} radii"
            ),
        }
    }
}

impl std::error::Error for AssemblyError {}
