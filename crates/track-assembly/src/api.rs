//! Curated entry points for callers that just want an assembled track.
//!
//! - Re-exports the types most callers touch.
//! - `assemble_layout` runs the whole pipeline: layout → geometry → fresh
//!   chain → placement and closure → neighbor adjacency.

pub use crate::assembly::{
    assemble, connect_neighbors, neighbors, AssemblyError, AssemblyReport, Chain, Closure,
    LinkPose, Phase, PoseSink,
};
pub use crate::check::{check_chain, ChainCheck};
pub use crate::geom::{ChassisFrame, ClearanceCfg, ShoeSpec, TrackGeometry, Wheel, Winding};
pub use crate::layout::{draw_layout, LayoutCfg, ReplayToken, TrackLayout};

/// Result of `assemble_layout`.
#[derive(Clone, Debug, PartialEq)]
pub struct AssembledTrack {
    pub geometry: TrackGeometry,
    pub report: AssemblyReport,
    /// One pose per link, in index order.
    pub poses: Vec<LinkPose>,
    /// `next[i]` is the neighbor link `i` connects to.
    pub next: Vec<usize>,
}

impl AssembledTrack {
    pub fn check(&self) -> Option<ChainCheck> {
        check_chain(&self.poses, self.geometry.shoe.pitch)
    }
}

/// Assemble `layout.links` links around `layout` and connect neighbors.
pub fn assemble_layout(
    layout: &TrackLayout,
    clearance: &ClearanceCfg,
) -> Result<AssembledTrack, AssemblyError> {
    let geometry = layout.geometry(clearance);
    let mut chain = Chain::with_links(layout.links);
    let report = assemble(&geometry, &mut chain)?;
    let next = neighbors(report.winding, layout.links);
    Ok(AssembledTrack {
        geometry,
        report,
        poses: chain.placed(),
        next,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_track_closes_with_all_links() {
        let track = assemble_layout(&TrackLayout::demo(), &ClearanceCfg::default()).unwrap();
        assert_eq!(track.report.winding, Winding::CounterClockwise);
        assert_eq!(track.report.links_used, 80);
        assert!(track.report.is_closed());
        assert_eq!(track.report.to_string(), "assembled, 80 links used (ccw)");
        assert_eq!(track.poses.len(), 80);
        assert_eq!(track.next[79], 0);
        let check = track.check().unwrap();
        assert!(check.is_consistent(0.1));
        assert!(check.closure_gap < 1e-6 * 0.1);
    }

    #[test]
    fn precondition_errors_propagate() {
        let mut layout = TrackLayout::demo();
        layout.supports.clear();
        assert_eq!(
            assemble_layout(&layout, &ClearanceCfg::default()),
            Err(AssemblyError::NoSupportWheels)
        );
        let layout = TrackLayout::demo().with_links(0);
        assert_eq!(
            assemble_layout(&layout, &ClearanceCfg::default()),
            Err(AssemblyError::EmptyChain)
        );
    }
}
