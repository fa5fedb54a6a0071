//! Loop closure: join the last anchor back to the chain start.
//!
//! The `remaining` links (even after the parity step) form two equal runs of
//! length `L = remaining · pitch / 2`. With `gap` the chord from the last anchor
//! to the start point, `alpha` its direction and `beta = acos(gap / (2L))`, runs
//! at `alpha − beta` and `alpha + beta` meet the start point exactly: the sum of
//! the two run vectors is `2L · cos(beta)` along `alpha`, which is `gap`.

use nalgebra::Vector2;

use super::phases::Stepper;
use super::types::{Closure, Cursor, PoseSink};
use crate::geom::acos_clamped;

/// Place every remaining link and report how the loop was closed.
///
/// Pre: the remaining link count is even.
pub(crate) fn close_loop<S: PoseSink>(
    st: &Stepper,
    start: Vector2<f64>,
    cur: Cursor,
    sink: &mut S,
) -> (Cursor, Closure) {
    let remaining = st.remaining(&cur);
    debug_assert!(remaining % 2 == 0, "closure needs an even link count");
    let gap = (start - cur.anchor).norm();
    let reach = remaining as f64 * st.pitch;

    if reach < gap {
        // Best effort: keep the current orientation, leave the loop open.
        let mut cur = cur;
        while !st.exhausted(&cur) {
            cur = st.step(cur, cur.angle, sink);
        }
        let closure = Closure::Insufficient {
            gap,
            remaining,
            deficit: gap - reach,
        };
        return (cur, closure);
    }
    if remaining == 0 {
        let closure = Closure::Closed {
            remaining,
            alpha: 0.0,
            beta: 0.0,
        };
        return (cur, closure);
    }

    let w = st.winding;
    let chord = w.mirror(start - cur.anchor);
    let alpha = chord.y.atan2(chord.x);
    let beta = acos_clamped(gap / reach);
    let mut cur = cur;
    for heading in [alpha - beta, alpha + beta] {
        let angle = w.mirror_angle(-heading);
        for _ in 0..remaining / 2 {
            cur = st.step(cur, angle, sink);
        }
    }
    (
        cur,
        Closure::Closed {
            remaining,
            alpha,
            beta,
        },
    )
}
