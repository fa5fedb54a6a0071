//! Geometric inputs of the assembly: wheels, shoe dimensions, winding.
//!
//! Purpose
//! - Hold read-only snapshots of the running gear in the chassis wrap plane.
//!   The assembly core never touches live simulation bodies.
//! - Keep every direction-dependent sign in one place (`Winding`).
//!
//! Code cross-refs: `assembly::assemble`, `layout::TrackLayout::geometry`.

pub mod cfg;
mod frame;
mod types;
mod util;
mod winding;

pub use cfg::ClearanceCfg;
pub use frame::ChassisFrame;
pub use types::{ShoeSpec, TrackGeometry, Wheel, WheelRole};
pub use util::{acos_clamped, asin_clamped, chord_half_angle};
pub use winding::{NearestSupports, Winding};
