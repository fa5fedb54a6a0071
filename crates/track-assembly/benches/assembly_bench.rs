//! Criterion benchmarks for track assembly.
//! Focus sizes: link counts in {80, 200, 800, 3200} on the reference layout,
//! plus a sweep over sampled layouts.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use track_assembly::prelude::*;

fn scaled_demo(links: usize) -> TrackLayout {
    // Stretch the reference track longitudinally to keep the belt length near the link budget.
    let mut layout = TrackLayout::demo().with_links(links);
    let scale = links as f64 / 80.0;
    for w in std::iter::once(&mut layout.drive)
        .chain(std::iter::once(&mut layout.idler))
        .chain(layout.supports.iter_mut())
    {
        w.center.x *= scale;
    }
    layout
}

fn bench_assembly(c: &mut Criterion) {
    let clearance = ClearanceCfg::default();
    let mut group = c.benchmark_group("assembly");
    for &n in &[80usize, 200, 800, 3200] {
        let geom = scaled_demo(n).geometry(&clearance);
        group.bench_with_input(BenchmarkId::new("assemble", n), &n, |b, &n| {
            b.iter_batched(
                || Chain::with_links(n),
                |mut chain| {
                    let _report = assemble(&geom, &mut chain).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function("assemble_layout_sampled", |b| {
        let cfg = LayoutCfg::default();
        let layouts: Vec<TrackLayout> = (0..64)
            .filter_map(|index| draw_layout(&cfg, ReplayToken { seed: 42, index }))
            .collect();
        b.iter(|| {
            for layout in &layouts {
                let _track = assemble_layout(layout, &clearance).unwrap();
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_assembly);
criterion_main!(benches);
