//! Closed track-chain assembly over a drive wheel, an idler, and support wheels.
//!
//! The crate computes an initial, geometrically consistent layout of a chain of
//! fixed-pitch links ("shoes") wrapped around the running gear of a tracked
//! vehicle. It works on plain geometric snapshots (wheel centers and effective
//! radii in the chassis wrap plane) and writes one pose per link into a
//! caller-owned sink. No dynamics, contact, or collision checks happen here.
//!
//! Conventions
//! - Wrap plane coordinates are `Vec2 { x: longitudinal, y: vertical }`; the
//!   chassis frame is x forward, y left, z up, so the wrap plane is chassis (x, z).
//! - Link angles are rotations about the chassis y axis.
//!
//! Layout of the crate
//! - `geom`: inputs, tolerances, winding direction, chassis-frame projection.
//! - `assembly`: placement phases, loop closure, neighbor adjacency.
//! - `layout`: raw track layouts and a seeded layout sampler.
//! - `check`: pitch/closure verification of a finished chain.

pub mod api;
pub mod assembly;
pub mod check;
pub mod geom;
pub mod layout;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{assemble_layout, AssembledTrack};
    pub use crate::assembly::{
        assemble, connect_neighbors, neighbors, AssemblyError, AssemblyReport, Chain, Closure,
        LinkPose, Phase, PoseSink,
    };
    pub use crate::check::{check_chain, ChainCheck};
    pub use crate::geom::{ChassisFrame, ClearanceCfg, ShoeSpec, TrackGeometry, Wheel, Winding};
    pub use crate::layout::{draw_layout, LayoutCfg, ReplayToken, TrackLayout};
    pub use nalgebra::Vector2 as Vec2;
}
