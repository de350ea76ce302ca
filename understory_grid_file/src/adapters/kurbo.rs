// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kurbo point extractor.
//!
//! ## Feature
//!
//! Enable with `kurbo`.
//!
//! ## Notes
//!
//! Records are placed on a two-dimensional grid: dimension `0` is `x`, dimension `1` is `y`.
//! Queries can pin either axis with [`AxisQuery`] or both with a [`Point`].

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;

use ::kurbo::Point;

use crate::extractor::{DimensionExtractor, PartialQuery, QueryExtractor};

/// Places records at the [`Point`] returned by a closure.
pub struct PointExtractor<T: ?Sized, F> {
    f: F,
    _t: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F: Fn(&T) -> Point> PointExtractor<T, F> {
    /// Wrap `f`, which yields the position of a record.
    pub fn new(f: F) -> Self {
        Self { f, _t: PhantomData }
    }
}

impl<T: ?Sized, F: Fn(&T) -> Point> DimensionExtractor<T> for PointExtractor<T, F> {
    fn dimension_count(&self, _record: &T) -> usize {
        2
    }

    fn coordinate(&self, record: &T, dim: usize) -> f64 {
        let p = (self.f)(record);
        match dim {
            0 => p.x,
            1 => p.y,
            _ => f64::NAN,
        }
    }

    fn coordinates(&self, record: &T) -> Vec<f64> {
        let p = (self.f)(record);
        vec![p.x, p.y]
    }
}

impl<T: ?Sized, F> Debug for PointExtractor<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointExtractor").finish_non_exhaustive()
    }
}

/// Query pinning zero, one, or both axes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AxisQuery {
    /// Required `x`, or any.
    pub x: Option<f64>,
    /// Required `y`, or any.
    pub y: Option<f64>,
}

impl<T: ?Sized, F> QueryExtractor<AxisQuery> for PointExtractor<T, F> {
    fn partial_point(&self, query: &AxisQuery) -> PartialQuery {
        PartialQuery::from_options(&[query.x, query.y])
    }
}

impl<T: ?Sized, F> QueryExtractor<Point> for PointExtractor<T, F> {
    fn partial_point(&self, query: &Point) -> PartialQuery {
        PartialQuery {
            point: vec![query.x, query.y],
            ignored: Vec::new(),
        }
    }
}
