// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits turning records and query descriptors into coordinates.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;

/// Maps a record to its coordinate vector.
///
/// Implementations must be deterministic: the same record always yields the same point.
pub trait DimensionExtractor<T: ?Sized> {
    /// Number of coordinates produced for `record`.
    fn dimension_count(&self, record: &T) -> usize;

    /// Coordinate of `record` along dimension `dim`.
    fn coordinate(&self, record: &T, dim: usize) -> f64;

    /// All coordinates of `record`.
    fn coordinates(&self, record: &T) -> Vec<f64> {
        (0..self.dimension_count(record))
            .map(|dim| self.coordinate(record, dim))
            .collect()
    }
}

/// A point with some dimensions left unconstrained.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartialQuery {
    /// One value per dimension; values at ignored positions are not consulted.
    pub point: Vec<f64>,
    /// Dimensions that match anything.
    pub ignored: Vec<usize>,
}

impl PartialQuery {
    /// Build a query from per-dimension optional values; `None` marks an ignored dimension.
    pub fn from_options(values: &[Option<f64>]) -> Self {
        let mut query = Self {
            point: Vec::with_capacity(values.len()),
            ignored: Vec::new(),
        };
        for (dim, v) in values.iter().enumerate() {
            match v {
                Some(v) => query.point.push(*v),
                None => {
                    query.point.push(0.0);
                    query.ignored.push(dim);
                }
            }
        }
        query
    }
}

/// Derives a [`PartialQuery`] from a loosely typed query descriptor `Q`.
///
/// Dimensions that cannot be derived from the descriptor are reported in
/// [`PartialQuery::ignored`]; this is never an error.
pub trait QueryExtractor<Q: ?Sized> {
    /// Translate the descriptor.
    fn partial_point(&self, query: &Q) -> PartialQuery;
}

impl<E: ?Sized> QueryExtractor<[Option<f64>]> for E {
    fn partial_point(&self, query: &[Option<f64>]) -> PartialQuery {
        PartialQuery::from_options(query)
    }
}

/// Extractor built from a closure producing all coordinates at once.
pub struct FnExtractor<T: ?Sized, F> {
    dimensions: usize,
    f: F,
    _t: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F: Fn(&T) -> Vec<f64>> FnExtractor<T, F> {
    /// Wrap `f`, which must always return `dimensions` coordinates.
    pub fn new(dimensions: usize, f: F) -> Self {
        Self {
            dimensions,
            f,
            _t: PhantomData,
        }
    }
}

impl<T: ?Sized, F: Fn(&T) -> Vec<f64>> DimensionExtractor<T> for FnExtractor<T, F> {
    fn dimension_count(&self, _record: &T) -> usize {
        self.dimensions
    }

    fn coordinate(&self, record: &T, dim: usize) -> f64 {
        (self.f)(record).get(dim).copied().unwrap_or(f64::NAN)
    }

    fn coordinates(&self, record: &T) -> Vec<f64> {
        (self.f)(record)
    }
}

impl<T: ?Sized, F> Debug for FnExtractor<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnExtractor")
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}

/// Extractor for records without coordinates; pairs with a zero-dimensional grid.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDimensions;

impl<T: ?Sized> DimensionExtractor<T> for NoDimensions {
    fn dimension_count(&self, _record: &T) -> usize {
        0
    }

    fn coordinate(&self, _record: &T, _dim: usize) -> f64 {
        f64::NAN
    }
}
