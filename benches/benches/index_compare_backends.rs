// Copyright 2025 the Cytomatch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use cytomatch_index::{Envelope, FlatVec, IndexGeneric, RegionIndex};

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

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_envelopes(count: usize, extent: f64, size: f64) -> Vec<Envelope> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (extent - size);
        let y0 = rng.next_f64() * (extent - size);
        out.push(Envelope::new(x0, y0, x0 + size, y0 + size));
    }
    out
}

fn gen_clustered_envelopes(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Envelope> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let x0 = cx + (rng.next_f64() - 0.5) * spread;
            let y0 = cy + (rng.next_f64() - 0.5) * spread;
            out.push(Envelope::new(x0, y0, x0 + 12.0, y0 + 12.0));
        }
    }
    out
}

fn entries(envelopes: &[Envelope]) -> Vec<(Envelope, u32)> {
    envelopes
        .iter()
        .copied()
        .enumerate()
        .map(|(i, e)| (e, i as u32))
        .collect()
}

fn bench_flatvec(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatvec");
    for &n in &[32usize, 64, 128] {
        let envelopes = gen_grid_envelopes(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("insert_query_n{}", n), |b| {
            b.iter_batched(
                IndexGeneric::<u32, FlatVec>::new,
                |mut idx| {
                    for (i, e) in envelopes.iter().copied().enumerate() {
                        idx.insert(e, i as u32);
                    }
                    let hits: usize =
                        idx.query(Envelope::new(100.0, 100.0, 500.0, 500.0)).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");
    for &n in &[32usize, 64, 128] {
        let envelopes = gen_grid_envelopes(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("bulk_build_query_n{}", n), |b| {
            b.iter_batched(
                || entries(&envelopes),
                |entries| {
                    let idx = RegionIndex::build(&entries);
                    let hits: usize =
                        idx.query(Envelope::new(100.0, 100.0, 500.0, 500.0)).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    let envelopes = gen_random_envelopes(4096, 2000.0, 12.0);
    group.bench_function("insert_query_random", |b| {
        b.iter_batched(
            RegionIndex::<u32>::new,
            |mut idx| {
                for (i, e) in envelopes.iter().copied().enumerate() {
                    idx.insert(e, i as u32);
                }
                let hits: usize = idx
                    .query(Envelope::new(800.0, 800.0, 1200.0, 1200.0))
                    .count();
                black_box(hits);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_quadtree_clustered(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_clustered");
    let envelopes = gen_clustered_envelopes(16, 256, 128.0);
    group.bench_function("bulk_build_query", |b| {
        b.iter_batched(
            || entries(&envelopes),
            |entries| {
                let idx = RegionIndex::build(&entries);
                let hits: usize = idx
                    .query(Envelope::new(800.0, 800.0, 1200.0, 1200.0))
                    .count();
                black_box(hits);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_query_heavy_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query_heavy");
    let envelopes = gen_grid_envelopes(128, 8.0);
    group.bench_function("build_then_many_queries", |b| {
        b.iter_batched(
            || RegionIndex::build(&entries(&envelopes)),
            |idx| {
                let mut total = 0usize;
                for q in 0..256 {
                    let x = (q % 64) as f64 * 8.0;
                    let y = (q / 64) as f64 * 8.0;
                    total += idx.query(Envelope::new(x, y, x + 64.0, y + 64.0)).count();
                }
                black_box(total);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_flatvec,
    bench_quadtree,
    bench_quadtree_clustered,
    bench_query_heavy_quadtree,
);
criterion_main!(benches);
