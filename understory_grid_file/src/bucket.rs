// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capacity-bounded record storage for one or more aliased grid cells.

use alloc::vec::Vec;
use core::ops::Range;

use crate::records::RecordId;

/// Stable handle of a bucket in the directory's bucket arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketId(usize);

impl BucketId {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// Outcome of [`Bucket::insert`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum BucketInsert {
    /// Occupancy is within capacity.
    Fits,
    /// Occupancy now exceeds capacity; the owner has to split the bucket.
    Overflow,
}

/// Records of one grid region.
///
/// A bucket covers a box of cells, stored per dimension as a half-open range of cell
/// indices. Every directory slot inside that box refers to this bucket.
#[derive(Clone, Debug)]
pub struct Bucket {
    records: Vec<RecordId>,
    max_size: usize,
    region: Vec<Range<usize>>,
}

impl Bucket {
    pub(crate) fn new(max_size: usize, region: Vec<Range<usize>>) -> Self {
        debug_assert!(max_size > 0, "bucket capacity must be positive");
        Self {
            records: Vec::new(),
            max_size,
            region,
        }
    }

    /// Add a record that is not yet in the bucket. The record is stored even when the bucket
    /// overflows.
    pub fn insert(&mut self, id: RecordId) -> BucketInsert {
        debug_assert!(!self.records.contains(&id), "record inserted twice");
        self.records.push(id);
        if self.is_overflowing() {
            BucketInsert::Overflow
        } else {
            BucketInsert::Fits
        }
    }

    /// Remove a record; `false` if it was not present.
    pub fn remove(&mut self, id: RecordId) -> bool {
        if let Some(pos) = self.records.iter().position(|&r| r == id) {
            self.records.swap_remove(pos);
            true
        } else {
            false
        }
    }

    /// Whether the bucket holds `id`.
    pub fn contains(&self, id: RecordId) -> bool {
        self.records.contains(&id)
    }

    /// The records currently held, in no particular order.
    pub fn records(&self) -> &[RecordId] {
        &self.records
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the bucket holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Configured capacity.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// True while occupancy exceeds capacity.
    pub fn is_overflowing(&self) -> bool {
        self.records.len() > self.max_size
    }

    /// Occupancy as a fraction of capacity.
    pub fn density(&self) -> f64 {
        self.records.len() as f64 / self.max_size as f64
    }

    /// Cell ranges covered by this bucket, one per dimension.
    pub fn region(&self) -> &[Range<usize>] {
        &self.region
    }

    pub(crate) fn region_mut(&mut self) -> &mut [Range<usize>] {
        &mut self.region
    }

    pub(crate) fn take_records(&mut self, keep: impl Fn(RecordId) -> bool) -> Vec<RecordId> {
        let mut taken = Vec::new();
        self.records.retain(|&id| {
            if keep(id) {
                true
            } else {
                taken.push(id);
                false
            }
        });
        taken
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}
