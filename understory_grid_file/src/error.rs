// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by every fallible grid file operation.

use alloc::string::String;

/// Errors reported by [`GridFile`](crate::GridFile) and [`GridConfig`](crate::GridConfig).
///
/// Absent records are not errors: lookups return empty vectors and removals return `false`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GridFileError {
    /// A point (from the extractor or a query) has the wrong number of coordinates.
    #[error("dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch {
        /// Dimensions of the index.
        expected: usize,
        /// Coordinates supplied.
        actual: usize,
    },

    /// An ignored-dimension index does not name a dimension of the index.
    #[error("dimension {dim} is out of range for a {dimensions}-dimensional index")]
    DimensionOutOfRange {
        /// Offending dimension index.
        dim: usize,
        /// Dimensions of the index.
        dimensions: usize,
    },

    /// A coordinate was NaN and cannot be placed on a scale.
    #[error("coordinate {dim} is NaN")]
    InvalidCoordinate {
        /// Dimension holding the NaN.
        dim: usize,
    },

    /// The configuration cannot describe a valid grid.
    #[error("invalid grid configuration: {0}")]
    InvalidConfig(String),

    /// A loosely typed value passed to [`GridFile::remove_any`](crate::GridFile::remove_any)
    /// is not a record of the index's type.
    #[error("type mismatch: expected a value of type `{expected}`")]
    TypeMismatch {
        /// Record type name of the index.
        expected: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = GridFileError> = core::result::Result<T, E>;
