//! Closed-chain assembly: place every link of a fixed-pitch chain around the
//! drive wheel, idler, and support wheels.
//!
//! Purpose
//! - Produce a kinematically plausible, closed initial layout before a
//!   tracked-vehicle simulation starts stepping.
//! - Stay a pure function of the geometry snapshot and the link count; the only
//!   side effect is writing poses into the caller's `PoseSink` in index order.
//!
//! Phases
//! 1. drive wrap, 2. upper run, 3. idler wrap, 4. idler run, 5. lower run,
//!    then a parity link so the remainder is even, then loop closure
//!    (two symmetric runs, or a straight best-effort run with a deficit report).
//!
//! Re-running with unchanged inputs reproduces the same poses bit for bit.
//!
//! Code cross-refs: `geom::{TrackGeometry,Winding}`, `adjacency::neighbors`.

mod adjacency;
mod closure;
mod error;
mod phases;
mod types;

pub use adjacency::{connect_neighbors, neighbors, next_index};
pub use error::AssemblyError;
pub use types::{
    AssemblyReport, Chain, Closure, Cursor, LinkPose, Phase, PhaseSpan, PoseSink,
};

use tracing::{debug, warn};

use crate::geom::{TrackGeometry, Winding};
use phases::Stepper;

/// Place all `sink.len()` links around `geom`.
///
/// Errors only on precondition violations; running out of links is reported
/// through `AssemblyReport::closure`.
pub fn assemble<S: PoseSink>(
    geom: &TrackGeometry,
    sink: &mut S,
) -> Result<AssemblyReport, AssemblyError> {
    geom.validate()?;
    if sink.is_empty() {
        return Err(AssemblyError::EmptyChain);
    }

    let winding = Winding::resolve(geom.drive.center, geom.idler.center);
    let nearest = winding.nearest_supports(&geom.supports);
    let idler_side = geom.supports[nearest.idler_side];
    let drive_side = geom.supports[nearest.drive_side];
    let st = Stepper {
        winding,
        pitch: geom.shoe.pitch,
        total: sink.len(),
    };
    debug!(%winding, links = st.total, pitch = st.pitch, "assembling track");

    let start = geom.drive.bottom();
    let mut cur = Cursor::start(start);
    let mut spans = Vec::with_capacity(Phase::FORWARD.len() + 1);
    for phase in Phase::FORWARD {
        let next = match phase {
            Phase::DriveWrap => phases::drive_wrap(&st, geom, cur, sink),
            Phase::UpperRun => phases::upper_run(&st, geom, cur, sink),
            Phase::IdlerWrap => phases::idler_wrap(&st, geom, cur, sink),
            Phase::IdlerRun => phases::idler_run(&st, geom, &idler_side, cur, sink),
            Phase::LowerRun => phases::lower_run(&st, &drive_side, cur, sink),
            Phase::Parity => phases::parity(&st, cur, sink),
            Phase::Closure => cur,
        };
        debug!(%phase, links = next.index - cur.index, "phase done");
        spans.push(PhaseSpan {
            phase,
            links: cur.index..next.index,
        });
        cur = next;
    }

    let gap = (start - cur.anchor).norm();
    let (last, closure) = closure::close_loop(&st, start, cur, sink);
    spans.push(PhaseSpan {
        phase: Phase::Closure,
        links: cur.index..last.index,
    });

    match closure {
        Closure::Insufficient {
            gap,
            remaining,
            deficit,
        } => warn!(
            gap,
            remaining, deficit, "insufficient links to close the track loop"
        ),
        Closure::Closed { .. } => debug!(links = last.index, "track assembly done"),
    }

    Ok(AssemblyReport {
        winding,
        links_used: last.index,
        spans,
        gap,
        closure,
    })
}
