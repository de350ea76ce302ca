// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction parameters for a [`GridFile`](crate::GridFile).

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::{GridFileError, Result};

/// Bucket capacity used by [`GridConfig::default`].
pub const DEFAULT_MAX_BUCKET_SIZE: usize = 16;

/// Construction parameters for a grid file.
///
/// `scales` holds the initial split boundaries, one list per dimension. Its length fixes the
/// dimensionality of the index; an empty list of scales builds a zero-dimensional index that
/// behaves as a plain set.
///
/// The two density fractions are advisory. They are validated and reported through
/// [`GridStats::underfull_buckets`](crate::GridStats::underfull_buckets), but removals never
/// merge buckets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Initial split boundaries per dimension; each list strictly increasing and finite.
    pub scales: Vec<Vec<f64>>,
    /// Maximum number of records a bucket holds before it splits.
    pub max_bucket_size: usize,
    /// Occupancy fraction below which a bucket counts as underfull.
    pub min_bucket_density: f64,
    /// Occupancy fraction a bucket is expected to stay under.
    pub max_bucket_density: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            scales: Vec::new(),
            max_bucket_size: DEFAULT_MAX_BUCKET_SIZE,
            min_bucket_density: 0.0,
            max_bucket_density: 1.0,
        }
    }
}

impl GridConfig {
    /// A configuration with `dimensions` empty scales (a single initial cell).
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            scales: vec![Vec::new(); dimensions],
            ..Self::default()
        }
    }

    /// A configuration with the given initial scales.
    pub fn with_scales(scales: Vec<Vec<f64>>) -> Self {
        Self {
            scales,
            ..Self::default()
        }
    }

    /// Set the bucket capacity.
    #[must_use]
    pub fn max_bucket_size(mut self, max_bucket_size: usize) -> Self {
        self.max_bucket_size = max_bucket_size;
        self
    }

    /// Set the advisory density bounds.
    #[must_use]
    pub fn bucket_density(mut self, min: f64, max: f64) -> Self {
        self.min_bucket_density = min;
        self.max_bucket_density = max;
        self
    }

    /// Number of dimensions described by this configuration.
    pub fn dimensions(&self) -> usize {
        self.scales.len()
    }

    /// Check that the configuration describes a valid grid.
    pub fn validate(&self) -> Result<()> {
        if self.max_bucket_size == 0 {
            return Err(GridFileError::InvalidConfig(
                "max_bucket_size must be positive".into(),
            ));
        }
        for (dim, scale) in self.scales.iter().enumerate() {
            if let Some(b) = scale.iter().find(|b| !b.is_finite()) {
                return Err(GridFileError::InvalidConfig(format!(
                    "scale {dim} has a non-finite boundary {b}"
                )));
            }
            if scale.windows(2).any(|w| w[0] >= w[1]) {
                return Err(GridFileError::InvalidConfig(format!(
                    "scale {dim} is not strictly increasing"
                )));
            }
        }
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.min_bucket_density) || !in_unit(self.max_bucket_density) {
            return Err(GridFileError::InvalidConfig(
                "bucket densities must lie in [0, 1]".into(),
            ));
        }
        if self.min_bucket_density > self.max_bucket_density {
            return Err(GridFileError::InvalidConfig(
                "min_bucket_density exceeds max_bucket_density".into(),
            ));
        }
        Ok(())
    }
}
