// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_grid_file::{DimensionExtractor, FnExtractor, GridConfig, GridFile};

/// Record id plus its coordinates as bit patterns, so it can be hashed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Rec {
    id: u32,
    at: Vec<u64>,
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

fn gen_uniform(count: usize, dims: usize, extent: f64) -> Vec<Rec> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|i| Rec {
            id: i as u32,
            at: (0..dims)
                .map(|_| (rng.next_f64() * extent).floor().to_bits())
                .collect(),
        })
        .collect()
}

fn gen_clustered(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Rec> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for c in 0..n_clusters {
        let (cx, cy) = (rng.next_f64() * 2000.0, rng.next_f64() * 2000.0);
        for k in 0..per_cluster {
            let x = (cx + (rng.next_f64() - 0.5) * spread).floor();
            let y = (cy + (rng.next_f64() - 0.5) * spread).floor();
            out.push(Rec {
                id: (c * per_cluster + k) as u32,
                at: vec![x.to_bits(), y.to_bits()],
            });
        }
    }
    out
}

fn extractor(dims: usize) -> impl DimensionExtractor<Rec> {
    FnExtractor::new(dims, |r: &Rec| r.at.iter().map(|&b| f64::from_bits(b)).collect())
}

fn build(recs: &[Rec], dims: usize, max: usize) -> GridFile<Rec, impl DimensionExtractor<Rec>> {
    let cfg = GridConfig::with_dimensions(dims).max_bucket_size(max);
    let mut g = GridFile::new(extractor(dims), cfg).unwrap();
    for r in recs {
        g.add(r.clone()).unwrap();
    }
    g
}

fn point(r: &Rec) -> Vec<f64> {
    r.at.iter().map(|&b| f64::from_bits(b)).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_file_insert");
    for &(dims, count) in &[(2usize, 4_096usize), (2, 16_384), (3, 4_096)] {
        let recs = gen_uniform(count, dims, 1000.0);
        group.throughput(Throughput::Elements(count as u64));
        for &max in &[8usize, 32] {
            group.bench_function(format!("uniform_d{dims}_n{count}_b{max}"), |b| {
                b.iter_batched(
                    || {
                        let cfg = GridConfig::with_dimensions(dims).max_bucket_size(max);
                        GridFile::new(extractor(dims), cfg).unwrap()
                    },
                    |mut g| {
                        for r in &recs {
                            let _ = g.add(r.clone());
                        }
                        black_box(g.len());
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    let clustered = gen_clustered(16, 512, 40.0);
    group.throughput(Throughput::Elements(clustered.len() as u64));
    group.bench_function("clustered_d2_n8192_b16", |b| {
        b.iter(|| black_box(build(&clustered, 2, 16).len()));
    });
    group.finish();
}

fn bench_exact_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_file_exact_match");
    for &count in &[4_096usize, 16_384] {
        let recs = gen_uniform(count, 2, 1000.0);
        let g = build(&recs, 2, 16);
        let queries: Vec<Vec<f64>> = recs.iter().step_by(7).map(point).collect();
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("uniform_d2_n{count}"), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for p in &queries {
                    hits += g.exact_match(p).map_or(0, |v| v.len());
                }
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_partial_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_file_partial_match");
    let recs = gen_uniform(16_384, 3, 100.0);
    let g = build(&recs, 3, 16);
    let queries: Vec<Vec<f64>> = recs.iter().step_by(97).map(point).collect();
    group.throughput(Throughput::Elements(queries.len() as u64));
    for ignored in [&[2usize][..], &[1, 2][..]] {
        group.bench_function(format!("uniform_d3_ignore{}", ignored.len()), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for p in &queries {
                    hits += g.partial_match(p, ignored).map_or(0, |v| v.len());
                }
                black_box(hits);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_exact_match, bench_partial_match);
criterion_main!(benches);
