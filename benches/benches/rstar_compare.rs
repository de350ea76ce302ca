// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_grid_file::{FnExtractor, GridConfig, GridFile};

use rstar::RTree;

fn gen_lattice(n: usize, step: f64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push([x as f64 * step, y as f64 * step]);
        }
    }
    out
}

/// Grid file records are lattice indices; coordinates come from the shared lattice.
fn bench_rstar_compare_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_compare_points");
    for &n in &[64usize, 128] {
        let pts = gen_lattice(n, 10.0);
        let queries: Vec<[f64; 2]> = pts.iter().step_by(13).copied().collect();
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("grid_file_build_query_n{n}"), |b| {
            b.iter_batched(
                || {
                    let extractor = FnExtractor::new(2, |i: &usize| pts[*i].to_vec());
                    let cfg = GridConfig::with_dimensions(2).max_bucket_size(16);
                    GridFile::new(extractor, cfg).unwrap()
                },
                |mut g| {
                    for i in 0..pts.len() {
                        let _ = g.add(i);
                    }
                    let mut hits = 0usize;
                    for p in &queries {
                        hits += g.exact_match(p).map_or(0, |v| v.len());
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_n{n}"), |b| {
            b.iter_batched(
                RTree::<[f64; 2]>::new,
                |mut tree| {
                    for p in &pts {
                        tree.insert(*p);
                    }
                    let mut hits = 0usize;
                    for p in &queries {
                        hits += tree.locate_all_at_point(p).count();
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || pts.clone(),
                |points| {
                    let tree = RTree::bulk_load(points);
                    let mut hits = 0usize;
                    for p in &queries {
                        hits += tree.locate_all_at_point(p).count();
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_compare_points);
criterion_main!(benches);
