// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid file basics.
//!
//! Insert points until buckets split, look records up by point, and print structural stats.
//! Set `RUST_LOG=understory_grid_file=debug` to watch the splits.
//!
//! Run:
//! - `cargo run -p understory_grid_file_demos --example grid_file_basics`

use tracing_subscriber::EnvFilter;
use understory_grid_file::{FnExtractor, GridConfig, GridFile};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct City {
    name: &'static str,
    lon: i32,
    lat: i32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cities = [
        ("Lisbon", -9, 38),
        ("Madrid", -4, 40),
        ("Paris", 2, 48),
        ("Brussels", 4, 50),
        ("Amsterdam", 5, 52),
        ("Berlin", 13, 52),
        ("Prague", 14, 50),
        ("Vienna", 16, 48),
        ("Rome", 12, 41),
        ("Warsaw", 21, 52),
    ];

    let extractor = FnExtractor::new(2, |c: &City| vec![f64::from(c.lon), f64::from(c.lat)]);
    let config = GridConfig::with_dimensions(2).max_bucket_size(3);
    let mut grid = GridFile::new(extractor, config).unwrap();
    for (name, lon, lat) in cities {
        grid.add(City { name, lon, lat }).unwrap();
    }

    // Adding an equal record again leaves the set unchanged.
    grid.add(City {
        name: "Paris",
        lon: 2,
        lat: 48,
    })
    .unwrap();
    assert_eq!(grid.len(), cities.len());

    let hits = grid.exact_match(&[13.0, 52.0]).unwrap();
    println!("at (13, 52): {:?}", hits.iter().map(|c| c.name).collect::<Vec<_>>());
    assert_eq!(hits.len(), 1);

    if let Some(directory) = grid.directory() {
        for (dim, scale) in directory.scales().iter().enumerate() {
            println!("scale {dim}: {:?}", scale.boundaries());
        }
    }
    let stats = grid.stats();
    println!("stats: {stats:?}");
    println!(
        "mean occupancy {:.2}, cells per bucket {:.2}",
        stats.mean_occupancy(),
        stats.sharing_factor()
    );
}
