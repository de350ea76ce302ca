// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural summary returned by [`GridFile::stats`](crate::GridFile::stats).

/// Structural summary of a grid file.
///
/// `underfull_buckets` is the hook for a compaction pass: the grid file never merges buckets
/// on removal, but callers can watch this figure and rebuild when it grows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridStats {
    /// Records in the index.
    pub records: usize,
    /// Buckets allocated.
    pub buckets: usize,
    /// Grid cells (product of per-dimension cell counts).
    pub cells: usize,
    /// Bucket splits performed.
    pub splits: usize,
    /// Splits that added a scale boundary.
    pub refinements: usize,
    /// Buckets above capacity because all their records share one point.
    pub overfull_buckets: usize,
    /// Non-empty buckets whose density is below the configured minimum.
    pub underfull_buckets: usize,
}

impl GridStats {
    /// Mean records per bucket, or zero without buckets.
    pub fn mean_occupancy(&self) -> f64 {
        if self.buckets == 0 {
            0.0
        } else {
            self.records as f64 / self.buckets as f64
        }
    }

    /// Mean grid cells sharing one bucket, or zero without buckets.
    pub fn sharing_factor(&self) -> f64 {
        if self.buckets == 0 {
            0.0
        } else {
            self.cells as f64 / self.buckets as f64
        }
    }
}
