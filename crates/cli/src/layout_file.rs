//! JSON layout files: `TrackLayout` plus optional clearance overrides.

use std::path::Path;

use anyhow::{Context, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use track_assembly::prelude::{ClearanceCfg, ShoeSpec, TrackLayout, Wheel};

/// Wheel in the wrap plane with its raw radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelDoc {
    pub x: f64,
    pub z: f64,
    pub radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClearanceDoc {
    pub drive: f64,
    pub idler: f64,
    pub support: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutDoc {
    pub drive: WheelDoc,
    pub idler: WheelDoc,
    pub supports: Vec<WheelDoc>,
    pub pitch: f64,
    pub height: f64,
    pub links: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearance: Option<ClearanceDoc>,
}

impl From<WheelDoc> for Wheel {
    fn from(w: WheelDoc) -> Self {
        Wheel::new(Vector2::new(w.x, w.z), w.radius)
    }
}

impl From<&Wheel> for WheelDoc {
    fn from(w: &Wheel) -> Self {
        Self {
            x: w.center.x,
            z: w.center.y,
            radius: w.radius,
        }
    }
}

impl LayoutDoc {
    pub fn from_layout(layout: &TrackLayout, clearance: Option<&ClearanceCfg>) -> Self {
        Self {
            drive: (&layout.drive).into(),
            idler: (&layout.idler).into(),
            supports: layout.supports.iter().map(WheelDoc::from).collect(),
            pitch: layout.shoe.pitch,
            height: layout.shoe.height,
            links: layout.links,
            clearance: clearance.map(|c| ClearanceDoc {
                drive: c.drive,
                idler: c.idler,
                support: c.support,
            }),
        }
    }

    pub fn layout(&self) -> TrackLayout {
        TrackLayout {
            drive: self.drive.into(),
            idler: self.idler.into(),
            supports: self.supports.iter().map(|&w| w.into()).collect(),
            shoe: ShoeSpec {
                pitch: self.pitch,
                height: self.height,
            },
            links: self.links,
        }
    }

    /// Clearance from the file, falling back to the library defaults.
    pub fn clearance(&self) -> ClearanceCfg {
        self.clearance
            .map(|c| ClearanceCfg {
                drive: c.drive,
                idler: c.idler,
                support: c.support,
            })
            .unwrap_or_default()
    }
}

pub fn read_layout(path: &Path) -> Result<LayoutDoc> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading layout {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing layout {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_round_trips_through_json() {
        let demo = TrackLayout::demo();
        let doc = LayoutDoc::from_layout(&demo, None);
        let text = serde_json::to_string(&doc).unwrap();
        assert!(!text.contains("clearance"));
        let back: LayoutDoc = serde_json::from_str(&text).unwrap();
        assert_eq!(back.layout(), demo);
        assert_eq!(back.clearance(), ClearanceCfg::default());
    }

    #[test]
    fn clearance_override_is_read() {
        let text = r#"{
            "drive": {"x": 1.5, "z": 0.0, "radius": 0.3},
            "idler": {"x": -1.5, "z": 0.0, "radius": 0.25},
            "supports": [{"x": 0.0, "z": -0.15, "radius": 0.25}],
            "pitch": 0.1, "height": 0.06, "links": 80,
            "clearance": {"drive": 0.0, "idler": 0.5, "support": 0.5}
        }"#;
        let doc: LayoutDoc = serde_json::from_str(text).unwrap();
        assert_eq!(doc.clearance().idler, 0.5);
        assert_eq!(doc.layout().supports.len(), 1);
    }
}
