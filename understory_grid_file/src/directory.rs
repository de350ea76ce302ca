// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested per-dimension directory routing points to buckets.
//!
//! Level `d` of the directory partitions space along dimension `d` using `Scale[d]`: a node on
//! level `d` has one slot per cell of that scale. Slots on the last level hold bucket handles;
//! all other slots hold the child node for the next dimension. Every cell has exactly one path
//! from the root; several terminal slots may hold the same bucket handle.
//!
//! Split procedure
//! ---------------
//! When a bucket overflows, the records are sorted per dimension and every position `k` with
//! `v[k-1] < v[k]` is a candidate with imbalance `|k - (n - k)|`. A candidate reuses an existing
//! scale boundary in `(v[k-1], v[k]]` when there is one; otherwise it refines the scale with the
//! new boundary `v[k]`. Cells are half-open, so `v[k]` is the lowest value of the upper side: for
//! the balanced cut of an even count that is the upper of the two central values. `+inf` is cut
//! at `f64::MAX` instead so boundaries stay finite. The least imbalanced candidate wins; ties
//! prefer reuse over refinement, then the lower dimension, then the lower `k`.
//!
//! Refining subdivides one cell: every node on that level duplicates the slot (deep-copying
//! child nodes, aliasing buckets). The bucket's region is then cut at the boundary and the upper
//! half goes to a fresh bucket. Records of the upper half are handed back to the caller as
//! displaced, to be reinserted from the top.

use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use tracing::{debug, trace, warn};

use crate::bucket::{Bucket, BucketId, BucketInsert};
use crate::records::{RecordId, Records};
use crate::scale::Scale;

/// Source of the cached point for each record id handed to the directory.
pub(crate) trait PointSource {
    /// Point of a live record.
    fn point_of(&self, id: RecordId) -> &[f64];
}

impl<T> PointSource for Records<T> {
    fn point_of(&self, id: RecordId) -> &[f64] {
        let point = self.point(id);
        debug_assert!(point.is_some(), "directory holds a stale record id");
        point.unwrap_or(&[])
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Slot {
    Node(NodeIdx),
    Bucket(BucketId),
}

#[derive(Clone, Debug)]
struct Node {
    level: usize,
    slots: Vec<Slot>,
}

/// Result of [`Directory::insert`].
#[derive(Clone, Debug, Default)]
pub(crate) struct DirectoryInsert {
    /// Records moved out of the receiving bucket by a split. They are not stored anywhere.
    pub(crate) displaced: Vec<RecordId>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Boundary {
    Existing(f64),
    New(f64),
}

#[derive(Copy, Clone, Debug)]
struct SplitPlan {
    dim: usize,
    imbalance: usize,
    boundary: Boundary,
}

impl SplitPlan {
    fn refines(&self) -> bool {
        matches!(self.boundary, Boundary::New(_))
    }

    fn beats(&self, other: &Self) -> bool {
        (self.imbalance, self.refines()) < (other.imbalance, other.refines())
    }
}

/// Directory of a grid file with at least one dimension.
#[derive(Clone)]
pub struct Directory {
    scales: Vec<Scale>,
    nodes: Vec<Node>,
    root: NodeIdx,
    buckets: Vec<Bucket>,
    max_bucket_size: usize,
    splits: usize,
    refinements: usize,
}

impl Directory {
    /// Build a directory with one bucket per initial cell.
    pub(crate) fn new(scales: Vec<Scale>, max_bucket_size: usize) -> Self {
        debug_assert!(!scales.is_empty(), "a directory needs at least one dimension");
        let mut dir = Self {
            scales,
            nodes: Vec::new(),
            root: NodeIdx(0),
            buckets: Vec::new(),
            max_bucket_size,
            splits: 0,
            refinements: 0,
        };
        let mut prefix = Vec::with_capacity(dir.scales.len());
        dir.root = dir.build(0, &mut prefix);
        dir
    }

    fn build(&mut self, level: usize, prefix: &mut Vec<Range<usize>>) -> NodeIdx {
        let cells = self.scales[level].cell_count();
        let last = level + 1 == self.scales.len();
        let mut slots = Vec::with_capacity(cells);
        for cell in 0..cells {
            prefix.push(cell..cell + 1);
            if last {
                let id = BucketId::new(self.buckets.len());
                self.buckets.push(Bucket::new(self.max_bucket_size, prefix.clone()));
                slots.push(Slot::Bucket(id));
            } else {
                slots.push(Slot::Node(self.build(level + 1, prefix)));
            }
            prefix.pop();
        }
        self.push_node(Node { level, slots })
    }

    fn push_node(&mut self, node: Node) -> NodeIdx {
        self.nodes.push(node);
        NodeIdx(self.nodes.len() - 1)
    }

    /// Number of dimensions.
    pub fn dimensions(&self) -> usize {
        self.scales.len()
    }

    /// Scales, one per dimension.
    pub fn scales(&self) -> &[Scale] {
        &self.scales
    }

    /// A bucket by handle.
    pub fn bucket(&self, id: BucketId) -> &Bucket {
        &self.buckets[id.get()]
    }

    /// All buckets with their handles.
    pub fn buckets(&self) -> impl Iterator<Item = (BucketId, &Bucket)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (BucketId::new(i), b))
    }

    /// Number of buckets ever allocated (buckets are never freed).
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of grid cells: the product of the cell counts of all scales.
    pub fn cell_count(&self) -> usize {
        self.scales.iter().map(Scale::cell_count).product()
    }

    /// Number of bucket splits performed.
    pub fn splits(&self) -> usize {
        self.splits
    }

    /// Number of splits that had to add a scale boundary.
    pub fn refinements(&self) -> usize {
        self.refinements
    }

    /// Bucket owning the cell that contains `point`.
    ///
    /// Panics if `point` has fewer coordinates than the directory has dimensions.
    pub fn resolve_bucket(&self, point: &[f64]) -> BucketId {
        debug_assert_eq!(point.len(), self.dimensions(), "point dimensionality");
        let mut node = self.root;
        let mut level = 0;
        loop {
            let cell = self.scales[level].cell_index(point[level]);
            match self.nodes[node.get()].slots[cell] {
                Slot::Node(child) => {
                    node = child;
                    level += 1;
                }
                Slot::Bucket(bucket) => return bucket,
            }
        }
    }

    /// Buckets that may hold records matching `point` on every dimension not in `ignored`.
    ///
    /// Ignored levels fan out across all their slots. Each bucket is returned once, even when
    /// several cells share it. Out-of-range entries of `ignored` are skipped.
    ///
    /// Panics if `point` has fewer coordinates than the directory has dimensions.
    pub fn partial_match_candidates(&self, point: &[f64], ignored: &[usize]) -> Vec<BucketId> {
        let mut mask = vec![false; self.dimensions()];
        for &d in ignored {
            if let Some(m) = mask.get_mut(d) {
                *m = true;
            }
        }
        let mut out = BTreeSet::new();
        self.collect_candidates(self.root, point, &mask, &mut out);
        out.into_iter().collect()
    }

    fn collect_candidates(
        &self,
        node: NodeIdx,
        point: &[f64],
        ignored: &[bool],
        out: &mut BTreeSet<BucketId>,
    ) {
        let node = &self.nodes[node.get()];
        let mut visit = |slot: Slot| match slot {
            Slot::Node(child) => self.collect_candidates(child, point, ignored, out),
            Slot::Bucket(bucket) => {
                out.insert(bucket);
            }
        };
        if ignored[node.level] {
            for &slot in &node.slots {
                visit(slot);
            }
        } else {
            let cell = self.scales[node.level].cell_index(point[node.level]);
            visit(node.slots[cell]);
        }
    }

    /// Store a record in the bucket owning `point`, splitting the bucket if it overflows.
    pub(crate) fn insert(
        &mut self,
        id: RecordId,
        point: &[f64],
        points: &impl PointSource,
    ) -> DirectoryInsert {
        let bucket = self.resolve_bucket(point);
        trace!(record = ?id, bucket = bucket.get(), "insert into bucket");
        let target = &mut self.buckets[bucket.get()];
        // An overfull bucket holds records no candidate separates; a point already among
        // them keeps it that way.
        let was_overfull = target.is_overflowing();
        if was_overfull
            && target
                .records()
                .first()
                .is_some_and(|&r| points.point_of(r) == point)
        {
            let _ = target.insert(id);
            return DirectoryInsert::default();
        }
        match target.insert(id) {
            BucketInsert::Fits => DirectoryInsert::default(),
            BucketInsert::Overflow => DirectoryInsert {
                displaced: self.split(bucket, was_overfull, points),
            },
        }
    }

    /// Remove a record from the bucket owning `point`.
    pub(crate) fn remove(&mut self, id: RecordId, point: &[f64]) -> bool {
        let bucket = self.resolve_bucket(point);
        self.buckets[bucket.get()].remove(id)
    }

    /// Empty every bucket; scales, nodes, and bucket regions stay as they are.
    pub(crate) fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    fn split(
        &mut self,
        bucket: BucketId,
        was_overfull: bool,
        points: &impl PointSource,
    ) -> Vec<RecordId> {
        let Some(plan) = self.plan_split(bucket, points) else {
            let occupancy = self.buckets[bucket.get()].len();
            if was_overfull {
                trace!(bucket = bucket.get(), occupancy, "bucket stays overfull");
            } else {
                warn!(
                    bucket = bucket.get(),
                    occupancy,
                    "bucket overflows but no boundary can separate its records; leaving it overfull"
                );
            }
            return Vec::new();
        };
        let dim = plan.dim;
        let cell = match plan.boundary {
            Boundary::Existing(b) => self.scales[dim].cell_index(b),
            Boundary::New(b) => match self.scales[dim].insert_boundary(b) {
                Some(subdivided) => {
                    self.refine(dim, subdivided);
                    subdivided + 1
                }
                None => self.scales[dim].cell_index(b),
            },
        };
        let upper = self.split_region(bucket, dim, cell);
        debug!(
            dim,
            boundary = ?plan.boundary,
            imbalance = plan.imbalance,
            bucket = bucket.get(),
            new_bucket = upper.get(),
            "split bucket"
        );
        let scale = &self.scales[dim];
        self.buckets[bucket.get()]
            .take_records(|id| scale.cell_index(points.point_of(id)[dim]) < cell)
    }

    fn plan_split(&self, bucket: BucketId, points: &impl PointSource) -> Option<SplitPlan> {
        let records = self.buckets[bucket.get()].records();
        let n = records.len();
        let mut best: Option<SplitPlan> = None;
        let mut values = Vec::with_capacity(n);
        for (dim, scale) in self.scales.iter().enumerate() {
            values.clear();
            values.extend(records.iter().map(|&id| points.point_of(id)[dim]));
            values.sort_by(f64::total_cmp);
            for k in 1..n {
                let (lo, hi) = (values[k - 1], values[k]);
                if lo >= hi {
                    continue;
                }
                let boundary = match scale.boundary_in(lo, hi) {
                    Some(b) => Boundary::Existing(b),
                    None => match new_boundary(lo, hi) {
                        Some(b) => Boundary::New(b),
                        None => continue,
                    },
                };
                let candidate = SplitPlan {
                    dim,
                    imbalance: k.abs_diff(n - k),
                    boundary,
                };
                if best.as_ref().is_none_or(|b| candidate.beats(b)) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// Cell `cell` of dimension `dim` was just subdivided into `cell` and `cell + 1`.
    fn refine(&mut self, dim: usize, cell: usize) {
        for idx in 0..self.nodes.len() {
            if self.nodes[idx].level != dim {
                continue;
            }
            let slot = self.nodes[idx].slots[cell];
            let dup = match slot {
                Slot::Node(child) => Slot::Node(self.clone_subtree(child)),
                bucket @ Slot::Bucket(_) => bucket,
            };
            self.nodes[idx].slots.insert(cell + 1, dup);
        }
        for bucket in &mut self.buckets {
            let range = &mut bucket.region_mut()[dim];
            if range.start > cell {
                range.start += 1;
                range.end += 1;
            } else if range.end > cell {
                range.end += 1;
            }
        }
        self.refinements += 1;
    }

    fn clone_subtree(&mut self, node: NodeIdx) -> NodeIdx {
        let Node { level, slots } = self.nodes[node.get()].clone();
        let mut copied = Vec::with_capacity(slots.len());
        for slot in slots {
            copied.push(match slot {
                Slot::Node(child) => Slot::Node(self.clone_subtree(child)),
                bucket @ Slot::Bucket(_) => bucket,
            });
        }
        self.push_node(Node {
            level,
            slots: copied,
        })
    }

    /// Move the cells of `bucket` at or above `cell` on `dim` to a fresh bucket.
    fn split_region(&mut self, bucket: BucketId, dim: usize, cell: usize) -> BucketId {
        let mut upper = self.buckets[bucket.get()].region().to_vec();
        debug_assert!(
            upper[dim].start < cell && cell < upper[dim].end,
            "split cell must be interior to the bucket region"
        );
        upper[dim].start = cell;
        self.buckets[bucket.get()].region_mut()[dim].end = cell;
        let fresh = BucketId::new(self.buckets.len());
        self.buckets.push(Bucket::new(self.max_bucket_size, upper.clone()));
        self.repoint(self.root, &upper, bucket, fresh);
        self.splits += 1;
        fresh
    }

    fn repoint(&mut self, node: NodeIdx, region: &[Range<usize>], from: BucketId, to: BucketId) {
        let level = self.nodes[node.get()].level;
        for cell in region[level].clone() {
            let slot = self.nodes[node.get()].slots[cell];
            match slot {
                Slot::Node(child) => self.repoint(child, region, from, to),
                Slot::Bucket(b) => {
                    debug_assert_eq!(b, from, "bucket regions must not overlap");
                    self.nodes[node.get()].slots[cell] = Slot::Bucket(to);
                }
            }
        }
    }
}

/// Finite boundary separating `lo` from `hi`, with `lo < hi`.
///
/// Boundaries stay finite: `+inf` is cut off at `f64::MAX`, which cannot separate it from
/// `f64::MAX` itself.
fn new_boundary(lo: f64, hi: f64) -> Option<f64> {
    if hi.is_finite() {
        Some(hi)
    } else if lo < f64::MAX {
        Some(f64::MAX)
    } else {
        None
    }
}

impl Debug for Directory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Directory")
            .field("dimensions", &self.dimensions())
            .field("cells", &self.cell_count())
            .field("nodes", &self.nodes.len())
            .field("buckets", &self.buckets.len())
            .field("splits", &self.splits)
            .field("refinements", &self.refinements)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Points indexed by record slot, standing in for the record arena.
    struct Points(Vec<Vec<f64>>);

    impl PointSource for Points {
        fn point_of(&self, id: RecordId) -> &[f64] {
            &self.0[id.idx()]
        }
    }

    impl Points {
        fn id(&self, i: usize) -> RecordId {
            RecordId::new(i, 1)
        }
    }

    fn directory(scales: &[&[f64]], max: usize) -> Directory {
        Directory::new(
            scales.iter().map(|s| Scale::new(s.to_vec())).collect(),
            max,
        )
    }

    /// Insert with the same worklist the facade uses.
    fn insert_all(dir: &mut Directory, points: &Points) {
        for i in 0..points.0.len() {
            let mut work = vec![points.id(i)];
            while let Some(id) = work.pop() {
                let out = dir.insert(id, points.point_of(id), points);
                work.extend(out.displaced);
            }
        }
    }

    /// Walk every cell and check it routes to a bucket whose region contains the cell.
    fn assert_consistent(dir: &Directory) {
        fn walk(dir: &Directory, node: NodeIdx, cells: &mut Vec<usize>, seen: &mut usize) {
            let n = &dir.nodes[node.get()];
            assert_eq!(n.slots.len(), dir.scales[n.level].cell_count());
            for (cell, slot) in n.slots.iter().enumerate() {
                cells.push(cell);
                match *slot {
                    Slot::Node(child) => walk(dir, child, cells, seen),
                    Slot::Bucket(b) => {
                        let region = dir.bucket(b).region();
                        for (d, c) in cells.iter().enumerate() {
                            assert!(region[d].contains(c), "cell {cells:?} outside {region:?}");
                        }
                        *seen += 1;
                    }
                }
                cells.pop();
            }
        }
        let mut seen = 0;
        walk(dir, dir.root, &mut Vec::new(), &mut seen);
        assert_eq!(seen, dir.cell_count());
        let covered: usize = dir
            .buckets()
            .map(|(_, b)| b.region().iter().map(|r| r.len()).product::<usize>())
            .sum();
        assert_eq!(covered, dir.cell_count(), "bucket regions tile the grid");
    }

    #[test]
    fn initial_cells_get_their_own_buckets() {
        let dir = directory(&[&[0.0], &[10.0, 20.0]], 4);
        assert_eq!(dir.cell_count(), 6);
        assert_eq!(dir.bucket_count(), 6);
        assert_ne!(
            dir.resolve_bucket(&[-1.0, 5.0]),
            dir.resolve_bucket(&[1.0, 5.0])
        );
        assert_eq!(
            dir.resolve_bucket(&[1.0, 12.0]),
            dir.resolve_bucket(&[100.0, 19.0])
        );
        assert_consistent(&dir);
    }

    #[test]
    fn overflow_refines_lowest_balanced_dimension() {
        let points = Points((0..5).map(|i| vec![f64::from(i), f64::from(i)]).collect());
        let mut dir = directory(&[&[], &[]], 4);
        insert_all(&mut dir, &points);
        assert_eq!(dir.splits(), 1);
        assert_eq!(dir.refinements(), 1);
        assert_eq!(dir.scales()[0].boundaries(), &[2.0]);
        assert!(dir.scales()[1].boundaries().is_empty());
        let low = dir.resolve_bucket(&[1.0, 1.0]);
        let high = dir.resolve_bucket(&[2.0, 2.0]);
        assert_ne!(low, high);
        assert_eq!(dir.bucket(low).len(), 2);
        assert_eq!(dir.bucket(high).len(), 3);
        assert_consistent(&dir);
    }

    #[test]
    fn refinement_aliases_buckets_across_other_dimensions() {
        // Two cells on dimension 1; refining dimension 0 must keep both alive and aliased.
        let mut dir = directory(&[&[], &[0.0]], 2);
        let points = Points(vec![
            vec![1.0, 5.0],
            vec![2.0, 5.0],
            vec![3.0, 5.0],
            vec![1.0, -5.0],
        ]);
        insert_all(&mut dir, &points);
        assert_eq!(dir.scales()[0].boundaries(), &[2.0]);
        // The negative half of dimension 1 was not split, so both of its cells share a bucket.
        assert_eq!(
            dir.resolve_bucket(&[0.0, -1.0]),
            dir.resolve_bucket(&[9.0, -1.0])
        );
        assert_ne!(
            dir.resolve_bucket(&[0.0, 1.0]),
            dir.resolve_bucket(&[9.0, 1.0])
        );
        assert_consistent(&dir);
    }

    #[test]
    fn shared_bucket_splits_along_existing_boundary() {
        let mut dir = directory(&[&[], &[0.0]], 2);
        // Refine dimension 0 at 2.0 through the positive half of dimension 1.
        let mut pts = vec![vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]];
        // Fill the negative half so its shared bucket overflows across the new boundary.
        pts.extend([vec![1.0, -5.0], vec![1.5, -5.0], vec![3.0, -5.0]]);
        let points = Points(pts);
        insert_all(&mut dir, &points);
        assert_eq!(
            dir.refinements(),
            1,
            "second split reuses the existing boundary"
        );
        assert_eq!(dir.splits(), 2);
        assert_ne!(
            dir.resolve_bucket(&[0.0, -1.0]),
            dir.resolve_bucket(&[9.0, -1.0])
        );
        assert_consistent(&dir);
    }

    #[test]
    fn identical_points_leave_bucket_overfull() {
        let points = Points(vec![vec![1.0, 1.0]; 4]);
        let mut dir = directory(&[&[], &[]], 2);
        insert_all(&mut dir, &points);
        assert_eq!(dir.splits(), 0);
        let b = dir.resolve_bucket(&[1.0, 1.0]);
        assert_eq!(dir.bucket(b).len(), 4);
        assert!(dir.bucket(b).is_overflowing());
    }

    #[test]
    fn infinite_values_split_at_finite_boundaries() {
        let points = Points(vec![
            vec![1.0],
            vec![f64::INFINITY],
            vec![f64::NEG_INFINITY],
            vec![f64::MAX],
        ]);
        let mut dir = directory(&[&[]], 1);
        insert_all(&mut dir, &points);
        assert_eq!(dir.scales()[0].boundaries(), &[1.0, f64::MAX]);
        assert_eq!(dir.splits(), 2);
        assert_ne!(
            dir.resolve_bucket(&[f64::NEG_INFINITY]),
            dir.resolve_bucket(&[1.0])
        );
        // Nothing finite lies between f64::MAX and +inf.
        let top = dir.resolve_bucket(&[f64::INFINITY]);
        assert_eq!(top, dir.resolve_bucket(&[f64::MAX]));
        assert_eq!(dir.bucket(top).len(), 2);
        assert_consistent(&dir);
    }

    #[test]
    fn overfull_bucket_skips_planning_for_its_own_point() {
        let mut pts = vec![vec![1.0, 1.0]; 10];
        pts.push(vec![5.0, 5.0]);
        pts.push(vec![1.0, 1.0]);
        let points = Points(pts);
        let mut dir = directory(&[&[], &[]], 2);
        for i in 0..10 {
            let out = dir.insert(points.id(i), points.point_of(points.id(i)), &points);
            assert!(out.displaced.is_empty());
        }
        assert_eq!(dir.splits(), 0);

        let far = points.id(10);
        let out = dir.insert(far, points.point_of(far), &points);
        assert_eq!(out.displaced, vec![far]);
        assert_eq!(dir.splits(), 1);
        let out = dir.insert(far, points.point_of(far), &points);
        assert!(out.displaced.is_empty());

        let same = points.id(11);
        let out = dir.insert(same, points.point_of(same), &points);
        assert!(out.displaced.is_empty());
        assert_eq!(dir.splits(), 1);
        let b = dir.resolve_bucket(&[1.0, 1.0]);
        assert_eq!(dir.bucket(b).len(), 11);
        assert_consistent(&dir);
    }

    #[test]
    fn partial_candidates_deduplicate_shared_buckets() {
        let dir = directory(&[&[0.0, 1.0], &[]], 4);
        let all = dir.partial_match_candidates(&[0.0, 0.0], &[0, 1]);
        assert_eq!(all.len(), 3);
        let one = dir.partial_match_candidates(&[0.5, 0.0], &[1]);
        assert_eq!(one, vec![dir.resolve_bucket(&[0.5, 0.0])]);
    }

    #[test]
    fn random_inserts_keep_regions_tiling_the_grid() {
        let mut state = 0x9E37_79B9_7F4A_7C15_u64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1_u64 << 53) as f64
        };
        let pts: Vec<Vec<f64>> = (0..300)
            .map(|_| vec![next() * 100.0, next() * 100.0, next() * 100.0])
            .collect();
        let points = Points(pts);
        let mut dir = directory(&[&[50.0], &[], &[25.0, 75.0]], 5);
        insert_all(&mut dir, &points);
        assert_consistent(&dir);
        let total: usize = dir.buckets().map(|(_, b)| b.len()).sum();
        assert_eq!(total, 300);
        for (_, b) in dir.buckets() {
            assert!(b.len() <= 5);
        }
        for i in 0..300 {
            let id = points.id(i);
            let b = dir.resolve_bucket(points.point_of(id));
            assert!(dir.bucket(b).contains(id), "record {i} not where it routes");
        }
    }

    #[test]
    fn clear_keeps_topology() {
        let points = Points((0..9).map(|i| vec![f64::from(i)]).collect());
        let mut dir = directory(&[&[]], 2);
        insert_all(&mut dir, &points);
        let buckets = dir.bucket_count();
        let scales = dir.scales().to_vec();
        dir.clear();
        assert_eq!(dir.bucket_count(), buckets);
        assert_eq!(dir.scales(), &scales[..]);
        assert!(dir.buckets().all(|(_, b)| b.is_empty()));
    }
}
