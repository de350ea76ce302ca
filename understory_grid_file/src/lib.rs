// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid_file --heading-base-level=0

//! Understory Grid File: an in-memory multidimensional point index.
//!
//! A grid file partitions space independently along each dimension and maps the resulting
//! cells to capacity-bounded buckets. Neighbouring cells may share a bucket, which keeps sparse
//! regions cheap; a bucket that overflows is split, adding a boundary to one dimension's scale
//! only when no existing boundary separates its records.
//!
//! - Insert and remove application records placed by a [`DimensionExtractor`].
//! - Exact-match lookup of every record at a point.
//! - Partial-match lookup constraining only some dimensions.
//! - Set semantics through the [`RecordSet`] trait: equal records are stored once.
//!
//! # Example
//!
//! ```rust
//! use understory_grid_file::{FnExtractor, GridConfig, GridFile};
//!
//! // Points on a 2D grid; a bucket holds at most four records.
//! let extractor = FnExtractor::new(2, |p: &(i32, i32)| vec![f64::from(p.0), f64::from(p.1)]);
//! let config = GridConfig::with_dimensions(2).max_bucket_size(4);
//! let mut grid = GridFile::new(extractor, config).unwrap();
//!
//! for i in 0..5 {
//!     grid.add((i, i)).unwrap();
//! }
//! assert_eq!(grid.len(), 5);
//! assert_eq!(grid.stats().splits, 1);
//!
//! // Exact match.
//! assert_eq!(grid.exact_match(&[2.0, 2.0]).unwrap(), vec![&(2, 2)]);
//!
//! // Partial match: any y, x == 3.
//! assert_eq!(grid.partial_match(&[3.0, 0.0], &[1]).unwrap(), vec![&(3, 3)]);
//! ```
//!
//! ## Splitting
//!
//! When a bucket overflows, the directory looks for the most balanced way to cut its records
//! in two along one dimension. An existing scale boundary is reused when it separates the
//! records; otherwise the scale gets a new boundary at the first coordinate of the upper half
//! of the bucket's records on that axis. Records moved out of the bucket are reinserted from
//! the top, so splits cascade until every bucket is within capacity. See [`directory`] for details.
//!
//! Buckets are never merged: removals leave scales and buckets in place. The configured
//! densities are reported through [`GridStats::underfull_buckets`] so callers can decide when
//! to rebuild.
//!
//! ### Float semantics
//!
//! Coordinates must not be NaN; [`GridFile::add`] rejects them. Infinite coordinates are
//! accepted; scale boundaries stay finite, so `+inf` is separated from finite values at
//! `f64::MAX` and cannot be separated from `f64::MAX` itself. Matching compares coordinates
//! with `==`, so `-0.0` and `0.0` are the same point.
//!
//! Records sharing one point cannot be split apart: their bucket stays above capacity and is
//! reported through [`GridStats::overfull_buckets`].
//!
//! ## Zero dimensions
//!
//! A configuration without scales builds a grid file with no directory. It behaves as a plain
//! set and every query returns all records.
//!
//! ## Features
//!
//! - `std` (default): use the standard library in dependencies.
//! - `libm`: float math for Kurbo without `std`.
//! - `kurbo`: `adapters::kurbo` extractor placing records at a `kurbo::Point`.
//! - `serde`: `Serialize`/`Deserialize` for [`GridConfig`] and [`GridStats`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod bucket;
pub mod config;
pub mod directory;
pub mod error;
pub mod extractor;
pub mod grid_file;
pub mod record_set;
mod records;
pub mod scale;
pub mod stats;

pub use bucket::{Bucket, BucketId, BucketInsert};
pub use config::GridConfig;
pub use directory::Directory;
pub use error::{GridFileError, Result};
pub use extractor::{DimensionExtractor, FnExtractor, NoDimensions, PartialQuery, QueryExtractor};
pub use grid_file::GridFile;
pub use record_set::RecordSet;
pub use records::RecordId;
pub use scale::Scale;
pub use stats::GridStats;
