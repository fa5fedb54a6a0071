//! Polars tables for assembled tracks and layout sweeps.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use track_assembly::prelude::{AssembledTrack, Closure};

/// One row per link: `index, x, z, angle, next` (x/z are the link center).
pub fn poses_frame(track: &AssembledTrack) -> Result<DataFrame> {
    let index: Vec<u32> = track.poses.iter().map(|p| p.index as u32).collect();
    let x: Vec<f64> = track.poses.iter().map(|p| p.center().x).collect();
    let z: Vec<f64> = track.poses.iter().map(|p| p.center().y).collect();
    let angle: Vec<f64> = track.poses.iter().map(|p| p.angle).collect();
    let next: Vec<u32> = track.next.iter().map(|&n| n as u32).collect();
    Ok(df!(
        "index" => index,
        "x" => x,
        "z" => z,
        "angle" => angle,
        "next" => next
    )?)
}

/// Per-layout summary row collected by `cli sample`.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub index: u64,
    pub winding: String,
    pub links: u32,
    pub closed: bool,
    pub gap: f64,
    pub deficit: Option<f64>,
    pub max_pitch_error: f64,
    pub closure_gap: f64,
}

impl SummaryRow {
    pub fn new(index: u64, track: &AssembledTrack) -> Self {
        let check = track.check();
        Self {
            index,
            winding: track.report.winding.to_string(),
            links: track.report.links_used as u32,
            closed: track.report.is_closed(),
            gap: track.report.gap,
            deficit: match track.report.closure {
                Closure::Insufficient { deficit, .. } => Some(deficit),
                Closure::Closed { .. } => None,
            },
            max_pitch_error: check.map_or(0.0, |c| c.max_pitch_error),
            closure_gap: check.map_or(0.0, |c| c.closure_gap),
        }
    }
}

pub fn summary_frame(rows: &[SummaryRow]) -> Result<DataFrame> {
    Ok(df!(
        "index" => rows.iter().map(|r| r.index).collect::<Vec<u64>>(),
        "winding" => rows.iter().map(|r| r.winding.as_str()).collect::<Vec<&str>>(),
        "links" => rows.iter().map(|r| r.links).collect::<Vec<u32>>(),
        "closed" => rows.iter().map(|r| r.closed).collect::<Vec<bool>>(),
        "gap" => rows.iter().map(|r| r.gap).collect::<Vec<f64>>(),
        "deficit" => rows.iter().map(|r| r.deficit).collect::<Vec<Option<f64>>>(),
        "max_pitch_error" => rows.iter().map(|r| r.max_pitch_error).collect::<Vec<f64>>(),
        "closure_gap" => rows.iter().map(|r| r.closure_gap).collect::<Vec<f64>>()
    )?)
}

/// Closed-layout counts per winding direction.
pub fn closure_rates(summary: &DataFrame) -> Result<DataFrame> {
    let out = summary
        .clone()
        .lazy()
        .group_by([col("winding")])
        .agg([
            col("index").count().alias("layouts"),
            col("closed").cast(DataType::UInt32).sum().alias("closed"),
            col("deficit").max().alias("max_deficit"),
        ])
        .sort(["winding"], SortMultipleOptions::default())
        .collect()?;
    Ok(out)
}

/// Write `df` as Parquet when `path` ends in `.parquet`, CSV otherwise.
pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let is_parquet = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        ParquetWriter::new(file).finish(df)?;
    } else {
        let mut file = file;
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use track_assembly::prelude::{assemble_layout, ClearanceCfg, TrackLayout};

    fn demo_track(links: usize) -> AssembledTrack {
        assemble_layout(
            &TrackLayout::demo().with_links(links),
            &ClearanceCfg::default(),
        )
        .unwrap()
    }

    #[test]
    fn poses_frame_has_one_row_per_link() {
        let df = poses_frame(&demo_track(80)).unwrap();
        assert_eq!(df.shape(), (80, 5));
        let next = df.column("next").unwrap().u32().unwrap();
        assert_eq!(next.get(79), Some(0));
    }

    #[test]
    fn summary_marks_short_chains() {
        let rows = vec![
            SummaryRow::new(0, &demo_track(80)),
            SummaryRow::new(1, &demo_track(40)),
        ];
        assert!(rows[0].closed && rows[0].deficit.is_none());
        assert!(!rows[1].closed && rows[1].deficit.unwrap() > 0.0);
        let df = summary_frame(&rows).unwrap();
        assert_eq!(df.height(), 2);
        let rates = closure_rates(&df).unwrap();
        assert_eq!(rates.height(), 1);
    }

    #[test]
    fn write_frame_picks_format_by_extension() {
        let dir = tempdir().unwrap();
        let mut df = poses_frame(&demo_track(80)).unwrap();
        let csv = dir.path().join("out/poses.csv");
        write_frame(&mut df, &csv).unwrap();
        let text = std::fs::read_to_string(&csv).unwrap();
        assert!(text.starts_with("index,x,z,angle,next"));
        let pq = dir.path().join("poses.parquet");
        write_frame(&mut df, &pq).unwrap();
        let bytes = std::fs::read(&pq).unwrap();
        assert_eq!(&bytes[..4], b"PAR1");
    }
}
