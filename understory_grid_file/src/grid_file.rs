// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `GridFile` API: set semantics on top of the directory.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt::Debug;
use core::hash::Hash;

use tracing::trace;

use crate::bucket::Bucket;
use crate::config::GridConfig;
use crate::directory::{Directory, PointSource};
use crate::error::{GridFileError, Result};
use crate::extractor::{DimensionExtractor, QueryExtractor};
use crate::record_set::RecordSet;
use crate::records::Records;
use crate::scale::Scale;
use crate::stats::GridStats;

/// A grid file over records of type `T`, placed by the extractor `E`.
///
/// The grid file is a set: records are identified by their `Eq`/`Hash`, and adding an equal
/// record again leaves the set unchanged. It keeps a clone of each record, so `T` is best a
/// cheap handle (an id, a small tuple, an `Rc`).
///
/// With zero dimensions there is no directory and the grid file behaves as a plain set; every
/// exact or partial match returns all records.
///
/// Record handles are 32-bit: a grid file holds fewer than 2^32 records at once.
pub struct GridFile<T, E> {
    extractor: E,
    config: GridConfig,
    records: Records<T>,
    directory: Option<Directory>,
}

impl<T, E> GridFile<T, E>
where
    T: Clone + Eq + Hash,
    E: DimensionExtractor<T>,
{
    /// Create an empty grid file; the configuration is validated first.
    pub fn new(extractor: E, config: GridConfig) -> Result<Self> {
        config.validate()?;
        let directory = (!config.scales.is_empty()).then(|| {
            let scales = config.scales.iter().cloned().map(Scale::new).collect();
            Directory::new(scales, config.max_bucket_size)
        });
        Ok(Self {
            extractor,
            config,
            records: Records::default(),
            directory,
        })
    }

    /// Number of dimensions.
    pub fn dimensions(&self) -> usize {
        self.config.dimensions()
    }

    /// The configuration the grid file was built with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The extractor placing records.
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// The directory, absent for zero dimensions.
    pub fn directory(&self) -> Option<&Directory> {
        self.directory.as_ref()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if there are no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `record` is present.
    pub fn contains(&self, record: &T) -> bool {
        self.records.contains(record)
    }

    /// Add a record.
    ///
    /// Always returns `Ok(true)`: an equal record already present absorbs the insert. Splits
    /// caused by the insert may displace other records; they are reinserted from the top until
    /// no more are displaced.
    pub fn add(&mut self, record: T) -> Result<bool> {
        if self.records.contains(&record) {
            return Ok(true);
        }
        let point = match self.directory {
            Some(_) => self.point_for(&record)?,
            None => Box::default(),
        };
        let (id, _) = self.records.insert(record, point);
        let Some(directory) = self.directory.as_mut() else {
            return Ok(true);
        };
        let mut work = vec![id];
        while let Some(id) = work.pop() {
            let out = directory.insert(id, self.records.point_of(id), &self.records);
            if !out.displaced.is_empty() {
                trace!(count = out.displaced.len(), "reinserting displaced records");
            }
            work.extend(out.displaced);
        }
        Ok(true)
    }

    /// Remove a record; `false` if it was not present.
    pub fn remove(&mut self, record: &T) -> bool {
        let Some((id, point)) = self.records.remove(record) else {
            return false;
        };
        if let Some(directory) = self.directory.as_mut() {
            let removed = directory.remove(id, &point);
            debug_assert!(removed, "record missing from the bucket its point routes to");
        }
        true
    }

    /// Remove a loosely typed value.
    ///
    /// Fails with [`GridFileError::TypeMismatch`] when `value` is not a `T`; otherwise behaves
    /// like [`GridFile::remove`].
    pub fn remove_any(&mut self, value: &dyn Any) -> Result<bool>
    where
        T: 'static,
    {
        let record = value
            .downcast_ref::<T>()
            .ok_or(GridFileError::TypeMismatch {
                expected: core::any::type_name::<T>(),
            })?;
        Ok(self.remove(record))
    }

    /// Records whose point equals `point` component-wise.
    ///
    /// With zero dimensions `point` is ignored and every record is returned.
    pub fn exact_match(&self, point: &[f64]) -> Result<Vec<&T>> {
        let Some(directory) = &self.directory else {
            return Ok(self.all());
        };
        self.check_point(point, &[])?;
        let bucket = directory.bucket(directory.resolve_bucket(point));
        Ok(self.matching(bucket, |p| p == point))
    }

    /// Records matching `point` on every dimension not listed in `ignored`.
    ///
    /// `point` needs one value per dimension; values at ignored positions are not read. When
    /// every dimension is ignored all records are returned and `point` is not inspected.
    pub fn partial_match(&self, point: &[f64], ignored: &[usize]) -> Result<Vec<&T>> {
        let dimensions = self.dimensions();
        let mut mask = vec![false; dimensions];
        for &dim in ignored {
            if dim >= dimensions {
                return Err(GridFileError::DimensionOutOfRange { dim, dimensions });
            }
            mask[dim] = true;
        }
        if mask.iter().all(|&m| m) {
            return Ok(self.all());
        }
        if ignored.is_empty() {
            return self.exact_match(point);
        }
        let Some(directory) = &self.directory else {
            return Ok(self.all());
        };
        self.check_point(point, &mask)?;
        let matches = |p: &[f64]| {
            p.iter()
                .zip(point)
                .zip(&mask)
                .all(|((a, b), &skip)| skip || a == b)
        };
        let mut out = Vec::new();
        for bucket in directory.partial_match_candidates(point, ignored) {
            out.extend(self.matching(directory.bucket(bucket), matches));
        }
        Ok(out)
    }

    /// Partial match from a query descriptor translated by the extractor.
    pub fn partial_match_query<Q>(&self, query: &Q) -> Result<Vec<&T>>
    where
        Q: ?Sized,
        E: QueryExtractor<Q>,
    {
        let partial = self.extractor.partial_point(query);
        self.partial_match(&partial.point, &partial.ignored)
    }

    /// Iterate over the records. The grid file cannot change while the iterator lives.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.records.iter().map(|(_, r)| r)
    }

    /// Keep only records for which `keep` returns `true`; `true` if anything was removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> bool {
        let doomed: Vec<T> = self
            .records
            .iter()
            .filter(|(_, r)| !keep(r))
            .map(|(_, r)| r.clone())
            .collect();
        for record in &doomed {
            self.remove(record);
        }
        !doomed.is_empty()
    }

    /// Remove every record. Scales and directory layout are kept.
    pub fn clear(&mut self) {
        self.records.clear();
        if let Some(directory) = self.directory.as_mut() {
            directory.clear();
        }
    }

    /// Structural summary.
    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats {
            records: self.len(),
            ..GridStats::default()
        };
        let Some(directory) = &self.directory else {
            return stats;
        };
        stats.buckets = directory.bucket_count();
        stats.cells = directory.cell_count();
        stats.splits = directory.splits();
        stats.refinements = directory.refinements();
        for (_, bucket) in directory.buckets() {
            if bucket.is_overflowing() {
                stats.overfull_buckets += 1;
            } else if !bucket.is_empty() && bucket.density() < self.config.min_bucket_density {
                stats.underfull_buckets += 1;
            }
        }
        stats
    }

    fn all(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn matching(&self, bucket: &Bucket, mut pred: impl FnMut(&[f64]) -> bool) -> Vec<&T> {
        bucket
            .records()
            .iter()
            .filter(|&&id| pred(self.records.point_of(id)))
            .filter_map(|&id| self.records.get(id))
            .collect()
    }

    fn point_for(&self, record: &T) -> Result<Box<[f64]>> {
        let point = self.extractor.coordinates(record);
        self.check_point(&point, &[])?;
        Ok(point.into_boxed_slice())
    }

    /// Length must match; NaN is rejected outside ignored positions.
    fn check_point(&self, point: &[f64], ignored: &[bool]) -> Result<()> {
        if point.len() != self.dimensions() {
            return Err(GridFileError::DimensionMismatch {
                expected: self.dimensions(),
                actual: point.len(),
            });
        }
        for (dim, v) in point.iter().enumerate() {
            if v.is_nan() && !ignored.get(dim).copied().unwrap_or(false) {
                return Err(GridFileError::InvalidCoordinate { dim });
            }
        }
        Ok(())
    }
}

impl<T, E> RecordSet<T> for GridFile<T, E>
where
    T: Clone + Eq + Hash,
    E: DimensionExtractor<T>,
{
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn contains(&self, record: &T) -> bool {
        Self::contains(self, record)
    }

    fn add(&mut self, record: T) -> Result<bool> {
        Self::add(self, record)
    }

    fn remove(&mut self, record: &T) -> bool {
        Self::remove(self, record)
    }

    fn retain<F>(&mut self, keep: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        Self::retain(self, keep)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a T> + 'a>
    where
        T: 'a,
    {
        Box::new(Self::iter(self))
    }
}

impl<T: Debug, E> Debug for GridFile<T, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridFile")
            .field("dimensions", &self.config.dimensions())
            .field("records", &self.records.len())
            .field("directory", &self.directory)
            .finish_non_exhaustive()
    }
}
