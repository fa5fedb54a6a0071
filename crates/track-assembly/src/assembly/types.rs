//! Data types of one assembly run: cursor, link poses, sinks, report.

use std::fmt;
use std::ops::Range;

use nalgebra::Vector2;

use crate::geom::Winding;

/// Placement state threaded by value from phase to phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    /// Index of the next link to place.
    pub index: usize,
    /// Free connector point of the last placed link (start point before any link).
    pub anchor: Vector2<f64>,
    /// Current orientation angle.
    pub angle: f64,
}

impl Cursor {
    #[inline]
    pub fn start(anchor: Vector2<f64>) -> Self {
        Self {
            index: 0,
            anchor,
            angle: 0.0,
        }
    }
}

/// Pose of one placed link in the wrap plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkPose {
    pub index: usize,
    /// Connector point shared with the previous link.
    pub start: Vector2<f64>,
    /// Connector point shared with the next link.
    pub end: Vector2<f64>,
    /// Rotation about the chassis y axis.
    pub angle: f64,
}

impl LinkPose {
    /// Body reference point: midpoint of the two connectors.
    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        (self.start + self.end) * 0.5
    }
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Receiver of link poses, written once per index in increasing order.
///
/// The sink owns the link slots (and, in a simulation, the shoe bodies they
/// refer to); the assembly only assigns poses.
pub trait PoseSink {
    /// Number of links in the chain.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Pre: `pose.index < self.len()`.
    fn assign(&mut self, pose: LinkPose);
}

/// Fixed-size chain of pose slots.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chain {
    slots: Vec<Option<LinkPose>>,
}

impl Chain {
    pub fn with_links(n: usize) -> Self {
        Self {
            slots: vec![None; n],
        }
    }
    #[inline]
    pub fn get(&self, index: usize) -> Option<&LinkPose> {
        self.slots.get(index).and_then(Option::as_ref)
    }
    /// Clear every slot, keeping the link count.
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
    /// Placed poses in index order (unfilled slots are skipped).
    pub fn placed(&self) -> Vec<LinkPose> {
        self.slots.iter().flatten().copied().collect()
    }
}

impl PoseSink for Chain {
    fn len(&self) -> usize {
        self.slots.len()
    }
    fn assign(&mut self, pose: LinkPose) {
        debug_assert!(pose.index < self.slots.len(), "link index out of range");
        if let Some(slot) = self.slots.get_mut(pose.index) {
            *slot = Some(pose);
        }
    }
}

/// Placement phases in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Half turn around the drive wheel, starting under it.
    DriveWrap,
    /// Straight run over the top, drive wheel → idler.
    UpperRun,
    /// Half turn around the idler.
    IdlerWrap,
    /// Straight run, idler → nearest support wheel.
    IdlerRun,
    /// Horizontal run under the support wheels.
    LowerRun,
    /// Single horizontal link making the remainder even.
    Parity,
    /// Two symmetric runs closing the loop.
    Closure,
}

impl Phase {
    /// Phases before loop closure.
    pub const FORWARD: [Phase; 6] = [
        Phase::DriveWrap,
        Phase::UpperRun,
        Phase::IdlerWrap,
        Phase::IdlerRun,
        Phase::LowerRun,
        Phase::Parity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::DriveWrap => "drive_wrap",
            Phase::UpperRun => "upper_run",
            Phase::IdlerWrap => "idler_wrap",
            Phase::IdlerRun => "idler_run",
            Phase::LowerRun => "lower_run",
            Phase::Parity => "parity",
            Phase::Closure => "closure",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Link indices placed by one phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseSpan {
    pub phase: Phase,
    pub links: Range<usize>,
}

/// Outcome of the loop closure step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Closure {
    /// The loop closed; `remaining` links were split into two runs at
    /// canonical angles `alpha ∓ beta`.
    Closed {
        remaining: usize,
        alpha: f64,
        beta: f64,
    },
    /// `remaining · pitch < gap`: the leftover links were laid out straight
    /// and the chain stays open by `deficit = gap − remaining · pitch`.
    Insufficient {
        gap: f64,
        remaining: usize,
        deficit: f64,
    },
}

/// Structured result of an assembly run.
#[derive(Clone, Debug, PartialEq)]
pub struct AssemblyReport {
    pub winding: Winding,
    pub links_used: usize,
    pub spans: Vec<PhaseSpan>,
    /// Distance between the chain start and the anchor entering closure.
    pub gap: f64,
    pub closure: Closure,
}

impl AssemblyReport {
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self.closure, Closure::Closed { .. })
    }
    pub fn deficit(&self) -> Option<f64> {
        match self.closure {
            Closure::Insufficient { deficit, .. } => Some(deficit),
            Closure::Closed { .. } => None,
        }
    }
    pub fn span(&self, phase: Phase) -> Option<&PhaseSpan> {
        self.spans.iter().find(|s| s.phase == phase)
    }
    /// Index of the extra horizontal link, if one was needed.
    pub fn parity_link(&self) -> Option<usize> {
        self.span(Phase::Parity)
            .filter(|s| !s.links.is_empty())
            .map(|s| s.links.start)
    }
}

impl fmt::Display for AssemblyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.closure {
            Closure::Closed { .. } => {
                write!(f, "assembled, {} links used ({})", self.links_used, self.winding)
            }
            Closure::Insufficient { deficit, .. } => {
                write!(f, "insufficient links, deficit = {deficit}")
            }
        }
    }
}
