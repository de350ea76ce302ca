// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partial-match queries.
//!
//! Place markers with the kurbo adapter, then query a column, a row, and a single point.
//!
//! Run:
//! - `cargo run -p understory_grid_file_demos --example partial_match`

use kurbo::Point;
use understory_grid_file::adapters::kurbo::{AxisQuery, PointExtractor};
use understory_grid_file::{GridConfig, GridFile};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Marker {
    label: char,
    x: i32,
    y: i32,
}

fn labels(hits: Vec<&Marker>) -> String {
    let mut v: Vec<char> = hits.into_iter().map(|m| m.label).collect();
    v.sort_unstable();
    v.into_iter().collect()
}

fn main() {
    tracing_subscriber::fmt::init();

    let extractor = PointExtractor::new(|m: &Marker| Point::new(f64::from(m.x), f64::from(m.y)));
    let mut grid = GridFile::new(extractor, GridConfig::with_dimensions(2).max_bucket_size(2)).unwrap();
    for (i, label) in (0_i32..).zip('a'..='p') {
        grid.add(Marker {
            label,
            x: i % 4,
            y: i / 4,
        })
        .unwrap();
    }

    let column = grid
        .partial_match_query(&AxisQuery {
            x: Some(1.0),
            y: None,
        })
        .unwrap();
    println!("x == 1: {}", labels(column));

    let row = grid.partial_match(&[0.0, 2.0], &[0]).unwrap();
    println!("y == 2: {}", labels(row));

    let at = grid.partial_match_query(&Point::new(3.0, 3.0)).unwrap();
    println!("(3, 3): {}", labels(at));

    // Loosely typed descriptor: missing coordinates are ignored.
    let loose: &[Option<f64>] = &[None, Some(0.0)];
    println!("y == 0: {}", labels(grid.partial_match_query(loose).unwrap()));

    println!("{:?}", grid.stats());
}
