// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-dimension split boundaries.

use alloc::vec::Vec;

/// Ordered split boundaries along one dimension.
///
/// `n` boundaries define `n + 1` half-open cells:
/// cell `0` is `(-inf, b[0])`, cell `k` is `[b[k-1], b[k])`, and cell `n` is `[b[n-1], +inf)`.
/// Boundaries are strictly increasing and are only ever added.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scale {
    boundaries: Vec<f64>,
}

impl Scale {
    /// Create a scale from boundaries that are already strictly increasing and finite.
    ///
    /// [`GridConfig::validate`](crate::GridConfig::validate) checks this before a grid is built.
    pub fn new(boundaries: Vec<f64>) -> Self {
        debug_assert!(
            boundaries.windows(2).all(|w| w[0] < w[1]),
            "scale boundaries must be strictly increasing"
        );
        Self { boundaries }
    }

    /// The split boundaries.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Number of cells along this dimension.
    pub fn cell_count(&self) -> usize {
        self.boundaries.len() + 1
    }

    /// Index of the cell containing `value`.
    #[inline]
    pub fn cell_index(&self, value: f64) -> usize {
        debug_assert!(!value.is_nan(), "coordinates must not be NaN");
        self.boundaries.partition_point(|&b| b <= value)
    }

    /// Lower and upper edge of cell `cell`; the outer cells extend to infinity.
    pub fn cell_bounds(&self, cell: usize) -> (f64, f64) {
        debug_assert!(cell < self.cell_count(), "cell index out of range");
        let lo = match cell {
            0 => f64::NEG_INFINITY,
            _ => self.boundaries[cell - 1],
        };
        let hi = self.boundaries.get(cell).copied().unwrap_or(f64::INFINITY);
        (lo, hi)
    }

    /// The first boundary `b` with `lo < b <= hi`, if any.
    pub(crate) fn boundary_in(&self, lo: f64, hi: f64) -> Option<f64> {
        let i = self.boundaries.partition_point(|&b| b <= lo);
        self.boundaries.get(i).copied().filter(|&b| b <= hi)
    }

    /// Insert a split boundary.
    ///
    /// Returns the index of the cell that was subdivided: afterwards it is cells `i` and
    /// `i + 1`, with `value` as the lower edge of `i + 1`. Returns `None` if `value` already is
    /// a boundary.
    pub fn insert_boundary(&mut self, value: f64) -> Option<usize> {
        debug_assert!(value.is_finite(), "scale boundaries must be finite");
        let i = self.cell_index(value);
        if i > 0 && self.boundaries[i - 1] == value {
            return None;
        }
        self.boundaries.insert(i, value);
        Some(i)
    }
}
