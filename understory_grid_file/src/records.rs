// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity set of indexed records with stable generational handles.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// Generational handle of an indexed record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u32, u32);

impl RecordId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Record ids are 32-bit; the range is checked in debug builds."
    )]
    pub(crate) const fn new(idx: usize, generation: u32) -> Self {
        debug_assert!(idx <= u32::MAX as usize, "record slot index exceeds u32");
        Self(idx as u32, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    record: T,
    point: Box<[f64]>,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

/// Arena of records plus a lookup from record value to handle.
///
/// Each record is stored once in a slot alongside its cached point, and once as a key of the
/// lookup map. The two always describe the same set.
#[derive(Clone, Debug)]
pub(crate) struct Records<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    lookup: HashMap<T, RecordId>,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            lookup: HashMap::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> Records<T> {
    /// Insert a record, returning its handle and whether it was new.
    pub(crate) fn insert(&mut self, record: T, point: Box<[f64]>) -> (RecordId, bool) {
        if let Some(&id) = self.lookup.get(&record) {
            return (id, false);
        }
        let entry = Entry {
            record: record.clone(),
            point,
        };
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.wrapping_add(1);
            slot.entry = Some(entry);
            RecordId::new(idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                entry: Some(entry),
            });
            RecordId::new(self.slots.len() - 1, 1)
        };
        self.lookup.insert(record, id);
        (id, true)
    }

    /// Remove a record, returning its former handle and point.
    pub(crate) fn remove(&mut self, record: &T) -> Option<(RecordId, Box<[f64]>)> {
        let id = self.lookup.remove(record)?;
        let entry = self.slots[id.idx()].entry.take()?;
        self.free_list.push(id.idx());
        Some((id, entry.point))
    }

    pub(crate) fn contains(&self, record: &T) -> bool {
        self.lookup.contains_key(record)
    }
}

impl<T> Records<T> {
    fn entry(&self, id: RecordId) -> Option<&Entry<T>> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_ref()
    }

    /// The record behind a live handle.
    pub(crate) fn get(&self, id: RecordId) -> Option<&T> {
        self.entry(id).map(|e| &e.record)
    }

    /// The cached point of a live handle.
    pub(crate) fn point(&self, id: RecordId) -> Option<&[f64]> {
        self.entry(id).map(|e| &*e.point)
    }

    pub(crate) fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Live records in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (RecordId, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.entry
                .as_ref()
                .map(|e| (RecordId::new(i, slot.generation), &e.record))
        })
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.lookup.clear();
    }
}
