use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use track_assembly::prelude::*;
use tracing_subscriber::fmt::SubscriberBuilder;

mod layout_file;
mod provenance;
mod tables;

use layout_file::{read_layout, LayoutDoc};
use provenance::{report_json, write_sidecar, Provenance};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Track-chain assembly runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Assemble the track described by a JSON layout and write the link poses
    Assemble {
        #[arg(long)]
        layout: PathBuf,
        /// Output table (.csv or .parquet)
        #[arg(long)]
        out: PathBuf,
    },
    /// Assemble the built-in reference track
    Demo {
        #[arg(long, default_value_t = 80)]
        links: usize,
        #[arg(long)]
        out: PathBuf,
        /// Also write the layout as JSON (input format of `assemble`)
        #[arg(long)]
        layout_out: Option<PathBuf>,
    },
    /// Assemble a stream of sampled layouts and write one summary row each
    Sample {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        count: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Assemble { layout, out } => assemble_file(&layout, &out),
        Action::Demo {
            links,
            out,
            layout_out,
        } => demo(links, &out, layout_out.as_deref()),
        Action::Sample { seed, count, out } => sample(seed, count, &out),
        Action::Report => report(),
    }
}

fn assemble_file(layout: &Path, out: &Path) -> Result<()> {
    tracing::info!(layout = %layout.display(), out = %out.display(), "assemble");
    let doc = read_layout(layout)?;
    let params = json!({ "layout": layout.to_string_lossy() });
    write_track(&doc, out, Provenance::new("assemble", params))
}

fn demo(links: usize, out: &Path, layout_out: Option<&Path>) -> Result<()> {
    tracing::info!(links, out = %out.display(), "demo");
    let doc = LayoutDoc::from_layout(&TrackLayout::demo().with_links(links), None);
    if let Some(path) = layout_out {
        std::fs::write(path, serde_json::to_vec_pretty(&doc)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    write_track(&doc, out, Provenance::new("demo", json!({ "links": links })))
}

fn write_track(doc: &LayoutDoc, out: &Path, prov: Provenance) -> Result<()> {
    let track = assemble_layout(&doc.layout(), &doc.clearance())
        .context("layout violates assembly preconditions")?;
    let report = &track.report;
    match report.deficit() {
        Some(deficit) => tracing::warn!(deficit, links = report.links_used, "track left open"),
        None => tracing::info!(
            links = report.links_used,
            winding = %report.winding,
            "track closed"
        ),
    }
    let mut df = tables::poses_frame(&track)?;
    tables::write_frame(&mut df, out)?;
    let check = track.check();
    let summary = json!({
        "status": report.to_string(),
        "winding": report.winding.to_string(),
        "links": report.links_used,
        "closed": report.is_closed(),
        "deficit": report.deficit(),
        "parity_link": report.parity_link(),
        "closure_gap": check.map(|c| c.closure_gap),
        "max_pitch_error": check.map(|c| c.max_pitch_error),
    });
    write_sidecar(out, &prov.with_summary(summary))?;
    Ok(())
}

fn sample(seed: u64, count: u64, out: &Path) -> Result<()> {
    tracing::info!(seed, count, out = %out.display(), "sample");
    let cfg = LayoutCfg::default();
    let clearance = ClearanceCfg::default();
    let mut rows = Vec::with_capacity(count as usize);
    for index in 0..count {
        let layout = draw_layout(&cfg, ReplayToken { seed, index })
            .context("layout sampler rejected its configuration")?;
        let track = assemble_layout(&layout, &clearance)
            .with_context(|| format!("assembling sampled layout {index}"))?;
        rows.push(tables::SummaryRow::new(index, &track));
    }
    let mut df = tables::summary_frame(&rows)?;
    let rates = tables::closure_rates(&df)?;
    tracing::info!(layouts = df.height(), "sample done\n{rates}");
    tables::write_frame(&mut df, out)?;
    let closed = rows.iter().filter(|r| r.closed).count();
    let prov = Provenance::new("sample", json!({ "seed": seed, "count": count }))
        .with_summary(json!({ "layouts": rows.len(), "closed": closed }));
    write_sidecar(out, &prov)?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = report_json(&Provenance::new("report", json!({})));
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
