// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use cytomatch_index::{Envelope, RegionIndex};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_envelopes(n: usize, cell: f64) -> Vec<Envelope> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Envelope::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[Envelope]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|e| Rectangle::from_corners([e.min_x, e.min_y], [e.max_x, e.max_y]))
        .collect()
}

fn bench_rtree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare");
    for &n in &[64usize, 128] {
        let envelopes = gen_grid_envelopes(n, 10.0);
        let window = Envelope::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("quadtree_build_query_n{}", n), |b| {
            b.iter_batched(
                || {
                    let entries: Vec<(Envelope, u32)> = envelopes
                        .iter()
                        .copied()
                        .enumerate()
                        .map(|(i, e)| (e, i as u32))
                        .collect();
                    entries
                },
                |entries| {
                    let idx = RegionIndex::build(&entries);
                    let hits: usize = idx.query(window).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&envelopes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [window.min_x, window.min_y],
                        [window.max_x, window.max_y],
                    );
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare);
criterion_main!(benches);
