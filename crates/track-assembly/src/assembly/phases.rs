//! Forward placement phases (drive wrap through parity link).
//!
//! Every phase takes the cursor by value and returns the advanced cursor. Angles
//! are formulated for counter-clockwise winding and mapped through
//! `Winding::mirror_angle`; longitudinal stop tests use `Winding::longitudinal`,
//! which makes them direction-agnostic.
//!
//! A phase also stops as soon as the link budget is exhausted.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

use super::types::{Cursor, LinkPose, PoseSink};
use crate::geom::{chord_half_angle, TrackGeometry, Wheel, Winding};

/// Places single links of fixed pitch.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Stepper {
    pub winding: Winding,
    pub pitch: f64,
    pub total: usize,
}

impl Stepper {
    #[inline]
    pub fn exhausted(&self, cur: &Cursor) -> bool {
        cur.index >= self.total
    }

    #[inline]
    pub fn remaining(&self, cur: &Cursor) -> usize {
        self.total.saturating_sub(cur.index)
    }

    /// Place link `cur.index` from `cur.anchor` at `angle`.
    pub fn step<S: PoseSink>(&self, cur: Cursor, angle: f64, sink: &mut S) -> Cursor {
        let end = cur.anchor + self.winding.direction(angle) * self.pitch;
        sink.assign(LinkPose {
            index: cur.index,
            start: cur.anchor,
            end,
            angle,
        });
        Cursor {
            index: cur.index + 1,
            anchor: end,
            angle,
        }
    }

    /// Chord recurrence around a circle of `radius`: the first link uses
    /// `start`, each following one turns by twice the half-chord angle, until
    /// `|angle|` reaches `limit`.
    pub fn wrap<S: PoseSink>(
        &self,
        cur: Cursor,
        start: f64,
        radius: f64,
        limit: f64,
        sink: &mut S,
    ) -> Cursor {
        let delta = self
            .winding
            .mirror_angle(-chord_half_angle(self.pitch, radius));
        let mut angle = start;
        let mut cur = cur;
        while angle.abs() < limit && !self.exhausted(&cur) {
            cur = self.step(cur, angle, sink);
            angle += 2.0 * delta;
        }
        Cursor { angle, ..cur }
    }

    /// Constant-angle run while `keep_going(anchor)` holds.
    pub fn run<S: PoseSink>(
        &self,
        cur: Cursor,
        angle: f64,
        keep_going: impl Fn(Vector2<f64>) -> bool,
        sink: &mut S,
    ) -> Cursor {
        let mut cur = Cursor { angle, ..cur };
        while !self.exhausted(&cur) && keep_going(cur.anchor) {
            cur = self.step(cur, angle, sink);
        }
        cur
    }
}

/// Phase 1: half turn around the drive wheel, starting at its lowest point and
/// moving away from the idler.
pub(crate) fn drive_wrap<S: PoseSink>(
    st: &Stepper,
    geom: &TrackGeometry,
    cur: Cursor,
    sink: &mut S,
) -> Cursor {
    let first = st
        .winding
        .mirror_angle(-chord_half_angle(st.pitch, geom.drive.radius));
    st.wrap(cur, first, geom.drive.radius, PI, sink)
}

/// Phase 2: straight run parallel to the line through the top points of the
/// drive wheel and idler; stops once the anchor is within half a pitch of the
/// idler center longitudinally.
pub(crate) fn upper_run<S: PoseSink>(
    st: &Stepper,
    geom: &TrackGeometry,
    cur: Cursor,
    sink: &mut S,
) -> Cursor {
    let w = st.winding;
    let rise = geom.drive.top().y - geom.idler.top().y;
    let span = w.mirror(geom.drive.center - geom.idler.center).x;
    let angle = w.mirror_angle(-PI - rise.atan2(span));
    let target = w.longitudinal(geom.idler.center) + 0.5 * st.pitch;
    st.run(cur, angle, |p| w.longitudinal(p) > target, sink)
}

/// Phase 3: continue around the idler until a full turn is accumulated.
pub(crate) fn idler_wrap<S: PoseSink>(
    st: &Stepper,
    geom: &TrackGeometry,
    cur: Cursor,
    sink: &mut S,
) -> Cursor {
    st.wrap(cur, cur.angle, geom.idler.radius, TAU, sink)
}

/// Phase 4: straight run parallel to the line through the bottom points of the
/// idler and `target`; stops after passing `target` longitudinally.
pub(crate) fn idler_run<S: PoseSink>(
    st: &Stepper,
    geom: &TrackGeometry,
    target: &Wheel,
    cur: Cursor,
    sink: &mut S,
) -> Cursor {
    let w = st.winding;
    let drop = geom.idler.bottom().y - target.bottom().y;
    let span = w.mirror(geom.idler.center - target.center).x;
    let angle = w.mirror_angle(-TAU + drop.atan2(-span));
    let stop = w.longitudinal(target.center);
    st.run(cur, angle, |p| w.longitudinal(p) < stop, sink)
}

/// Phase 5: horizontal run under the support wheels; stops after passing `target`.
pub(crate) fn lower_run<S: PoseSink>(
    st: &Stepper,
    target: &Wheel,
    cur: Cursor,
    sink: &mut S,
) -> Cursor {
    let w = st.winding;
    let stop = w.longitudinal(target.center);
    st.run(cur, w.mirror_angle(0.0), |p| w.longitudinal(p) < stop, sink)
}

/// One more link at the current angle when an odd number of links is left.
pub(crate) fn parity<S: PoseSink>(st: &Stepper, cur: Cursor, sink: &mut S) -> Cursor {
    if st.remaining(&cur) % 2 == 1 {
        st.step(cur, cur.angle, sink)
    } else {
        cur
    }
}
