// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use cytomatch_core::{Plane, Region, match_regions};
use geo::{LineString, MultiPolygon, Polygon};

fn rect_region(label: u32, x0: f64, y0: f64, x1: f64, y1: f64) -> Region {
    let poly = MultiPolygon::new(vec![Polygon::new(
        LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
        vec![],
    )]);
    Region::new(label, poly, 1.0, Plane::default()).expect("non-degenerate rect")
}

/// One `cell`-sized whole cell per grid slot, each with a centered nucleus.
fn gen_contained(n: usize, cell: f64) -> (Vec<Region>, Vec<Region>) {
    let mut nuclei = Vec::with_capacity(n * n);
    let mut cells = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let label = (y * n + x + 1) as u32;
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            cells.push(rect_region(label, x0, y0, x0 + cell, y0 + cell));
            let inset = cell * 0.25;
            nuclei.push(rect_region(
                label,
                x0 + inset,
                y0 + inset,
                x0 + cell - inset,
                y0 + cell - inset,
            ));
        }
    }
    (nuclei, cells)
}

/// Nuclei shifted off their cells so every pair goes through the overlap
/// ranking instead of exact containment.
fn gen_straddling(n: usize, cell: f64) -> (Vec<Region>, Vec<Region>) {
    let (mut nuclei, cells) = gen_contained(n, cell);
    let shift = cell * 0.4;
    for nucleus in &mut nuclei {
        let e = nucleus.envelope();
        *nucleus = rect_region(
            nucleus.label(),
            e.min_x + shift,
            e.min_y,
            e.max_x + shift,
            e.max_y,
        );
    }
    (nuclei, cells)
}

fn bench_match_contained(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_contained");
    for &n in &[16usize, 32, 64] {
        let (nuclei, cells) = gen_contained(n, 20.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| {
                let result = match_regions(black_box(&nuclei), black_box(&cells));
                black_box(result.pairs.len());
            })
        });
    }
    group.finish();
}

fn bench_match_straddling(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_straddling");
    for &n in &[16usize, 32] {
        let (nuclei, cells) = gen_straddling(n, 20.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| {
                let result = match_regions(black_box(&nuclei), black_box(&cells));
                black_box(result.pairs.len());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_match_contained, bench_match_straddling);
criterion_main!(benches);
