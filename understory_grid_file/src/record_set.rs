// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Set-like collection contract exposed by the grid file.

use alloc::boxed::Box;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::error::Result;

/// Set-like collection of records.
///
/// Records are identified by their own `Eq`/`Hash`: adding a record equal to one already
/// present does not grow the set. There is deliberately no array export; callers collect from
/// [`RecordSet::iter`] instead.
pub trait RecordSet<T> {
    /// Number of records.
    fn len(&self) -> usize;

    /// True if there are no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `record` is present.
    fn contains(&self, record: &T) -> bool;

    /// Whether every record of `records` is present.
    fn contains_all<'a, I>(&self, records: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        records.into_iter().all(|r| self.contains(r))
    }

    /// Add a record. Returns `true` once the record is present, including when an equal record
    /// already was.
    fn add(&mut self, record: T) -> Result<bool>;

    /// Add every record, stopping at the first error.
    fn add_all<I>(&mut self, records: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        let mut added = false;
        for record in records {
            added |= self.add(record)?;
        }
        Ok(added)
    }

    /// Remove a record; `false` if it was not present.
    fn remove(&mut self, record: &T) -> bool;

    /// Remove every listed record; `true` if anything was removed.
    fn remove_all<'a, I>(&mut self, records: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut changed = false;
        for record in records {
            changed |= self.remove(record);
        }
        changed
    }

    /// Keep only records for which `keep` returns `true`; `true` if anything was removed.
    fn retain<F>(&mut self, keep: F) -> bool
    where
        F: FnMut(&T) -> bool;

    /// Keep only records also listed in `records`; `true` if anything was removed.
    fn retain_all<'a, I>(&mut self, records: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: Eq + Hash + 'a,
    {
        let keep: HashSet<&T> = records.into_iter().collect();
        self.retain(|r| keep.contains(r))
    }

    /// Remove every record.
    fn clear(&mut self);

    /// Iterate over the records present when the iterator was created.
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a T> + 'a>
    where
        T: 'a;
}
