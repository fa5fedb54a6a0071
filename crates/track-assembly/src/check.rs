//! Verification of a placed chain: link lengths, joint continuity, closure.

use crate::assembly::LinkPose;
use crate::geom::cfg::PITCH_EPS;

/// Measured deviations of a chain from an ideal closed loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChainCheck {
    pub links: usize,
    /// max |‖end − start‖ − pitch| over all links.
    pub max_pitch_error: f64,
    /// max distance between a link's end and the next link's start.
    pub max_joint_gap: f64,
    /// Distance from the last link's end to the first link's start.
    pub closure_gap: f64,
}

impl ChainCheck {
    /// Every link has length `pitch` and consecutive links share connectors.
    pub fn is_consistent(&self, pitch: f64) -> bool {
        let tol = PITCH_EPS * pitch;
        self.max_pitch_error <= tol && self.max_joint_gap <= tol
    }
    pub fn is_closed(&self, pitch: f64) -> bool {
        self.closure_gap <= PITCH_EPS * pitch
    }
}

/// Measure `poses` (in index order). None for an empty chain.
pub fn check_chain(poses: &[LinkPose], pitch: f64) -> Option<ChainCheck> {
    let first = poses.first()?;
    let last = poses.last()?;
    let max_pitch_error = poses
        .iter()
        .map(|p| (p.length() - pitch).abs())
        .fold(0.0, f64::max);
    let max_joint_gap = poses
        .windows(2)
        .map(|w| (w[1].start - w[0].end).norm())
        .fold(0.0, f64::max);
    Some(ChainCheck {
        links: poses.len(),
        max_pitch_error,
        max_joint_gap,
        closure_gap: (first.start - last.end).norm(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn link(index: usize, start: [f64; 2], end: [f64; 2]) -> LinkPose {
        LinkPose {
            index,
            start: vector![start[0], start[1]],
            end: vector![end[0], end[1]],
            angle: 0.0,
        }
    }

    #[test]
    fn unit_square_is_closed_and_consistent() {
        let poses = vec![
            link(0, [0.0, 0.0], [1.0, 0.0]),
            link(1, [1.0, 0.0], [1.0, 1.0]),
            link(2, [1.0, 1.0], [0.0, 1.0]),
            link(3, [0.0, 1.0], [0.0, 0.0]),
        ];
        let c = check_chain(&poses, 1.0).unwrap();
        assert_eq!(c.links, 4);
        assert!(c.is_consistent(1.0));
        assert!(c.is_closed(1.0));
    }

    #[test]
    fn open_chain_reports_gap_and_bad_pitch() {
        let poses = vec![
            link(0, [0.0, 0.0], [1.0, 0.0]),
            link(1, [1.0, 0.0], [2.5, 0.0]),
        ];
        let c = check_chain(&poses, 1.0).unwrap();
        assert!((c.max_pitch_error - 0.5).abs() < 1e-12);
        assert!((c.closure_gap - 2.5).abs() < 1e-12);
        assert!(!c.is_consistent(1.0));
        assert!(!c.is_closed(1.0));
    }

    #[test]
    fn empty_chain_has_no_check() {
        assert!(check_chain(&[], 1.0).is_none());
    }
}
