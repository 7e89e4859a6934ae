//! The lock-striped concurrent spatial index.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use gridstead_core::CellRect;
use indexmap::IndexMap;

use crate::config::IndexConfig;

/// One indexed footprint: the rectangle it covers and the caller's data.
///
/// An entry is replicated into every bucket its rectangle overlaps, so
/// any bucket touched by a query already holds every entry that could
/// intersect it.
#[derive(Clone, Debug)]
struct Entry<T> {
    rect: CellRect,
    data: T,
}

/// The buckets owned by one lock stripe, raster order within the stripe.
struct LockCell<T> {
    buckets: Vec<Vec<Entry<T>>>,
}

/// Inclusive range of lock cells overlapped by a rectangle.
#[derive(Clone, Copy, PartialEq, Eq)]
struct LockRange {
    x0: u32,
    x1: u32,
    y0: u32,
    y1: u32,
}

/// A concurrent spatial index over rectangular footprints.
///
/// Entries are `(rect, data)` pairs in index-local coordinates. Every
/// rectangle passed to any operation must be non-empty and lie within
/// `[0, width] × [0, height]`; out-of-range arguments are a caller bug,
/// checked by `debug_assert!`, never clamped.
///
/// Each operation locks exactly the lock cells its rectangle overlaps,
/// acquired in raster order (increasing Y, then increasing X) and
/// released in reverse, so overlapping operations order consistently and
/// disjoint ones run in parallel. `check_if_free` followed by a separate
/// insert is racy by construction; use [`try_insert`](Self::try_insert)
/// when the answer must still hold at insertion time.
pub struct SpatialIndex<T> {
    config: IndexConfig,
    cells: Vec<RwLock<LockCell<T>>>,
}

impl<T> SpatialIndex<T> {
    /// Create an empty index with the given geometry.
    pub fn new(config: IndexConfig) -> Self {
        let (lock_cols, lock_rows) = config.lock_grid();
        let (bpl_x, bpl_y) = config.buckets_per_lock();
        let buckets_per_cell = (bpl_x * bpl_y) as usize;
        let cells = (0..lock_cols as usize * lock_rows as usize)
            .map(|_| {
                RwLock::new(LockCell {
                    buckets: (0..buckets_per_cell).map(|_| Vec::new()).collect(),
                })
            })
            .collect();
        Self { config, cells }
    }

    /// The geometry this index was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The index extent as a rectangle at the origin.
    pub fn bounds(&self) -> CellRect {
        CellRect::new(
            (0, 0).into(),
            (self.config.width() as i32, self.config.height() as i32).into(),
        )
    }

    // ── geometry helpers ─────────────────────────────────────────────────

    fn check_rect(&self, rect: &CellRect) {
        debug_assert!(!rect.is_empty(), "index rect {rect} is empty");
        debug_assert!(
            rect.min.x >= 0
                && rect.min.y >= 0
                && rect.max.x <= self.config.width() as i32
                && rect.max.y <= self.config.height() as i32,
            "rect {rect} exceeds index bounds {}",
            self.bounds()
        );
    }

    fn lock_range(&self, rect: &CellRect) -> LockRange {
        let (lw, lh) = self.config.lock_cell();
        LockRange {
            x0: rect.min.x as u32 / lw,
            x1: (rect.max.x as u32 - 1) / lw,
            y0: rect.min.y as u32 / lh,
            y1: (rect.max.y as u32 - 1) / lh,
        }
    }

    fn cell_slot(&self, lx: u32, ly: u32) -> usize {
        let (lock_cols, _) = self.config.lock_grid();
        (ly * lock_cols + lx) as usize
    }

    /// Within-cell bucket slots of lock cell `(lx, ly)` overlapped by
    /// `rect`, raster order.
    fn bucket_slots(&self, lx: u32, ly: u32, rect: &CellRect) -> Vec<usize> {
        let (lw, lh) = self.config.lock_cell();
        let cell_rect = CellRect::new(
            ((lx * lw) as i32, (ly * lh) as i32).into(),
            (((lx + 1) * lw) as i32, ((ly + 1) * lh) as i32).into(),
        );
        let clipped = rect.intersection(&cell_rect);
        if clipped.is_empty() {
            return Vec::new();
        }

        let (bw, bh) = self.config.bucket();
        let (bpl_x, _) = self.config.buckets_per_lock();
        let bx0 = clipped.min.x as u32 / bw;
        let bx1 = (clipped.max.x as u32 - 1) / bw;
        let by0 = clipped.min.y as u32 / bh;
        let by1 = (clipped.max.y as u32 - 1) / bh;

        let base_bx = lx * lw / bw;
        let base_by = ly * lh / bh;
        let mut slots = Vec::with_capacity(((bx1 - bx0 + 1) * (by1 - by0 + 1)) as usize);
        for by in by0..=by1 {
            for bx in bx0..=bx1 {
                slots.push(((by - base_by) * bpl_x + (bx - base_bx)) as usize);
            }
        }
        slots
    }

    // ── locking ──────────────────────────────────────────────────────────

    /// Acquire read guards over the range, raster order, paired with the
    /// lock cell coordinates each one covers.
    fn read_cells(&self, range: LockRange) -> Vec<(u32, u32, RwLockReadGuard<'_, LockCell<T>>)> {
        let mut guards = Vec::new();
        for ly in range.y0..=range.y1 {
            for lx in range.x0..=range.x1 {
                guards.push((lx, ly, self.cells[self.cell_slot(lx, ly)].read().unwrap()));
            }
        }
        guards
    }

    fn write_cells(&self, range: LockRange) -> Vec<(u32, u32, RwLockWriteGuard<'_, LockCell<T>>)> {
        let mut guards = Vec::new();
        for ly in range.y0..=range.y1 {
            for lx in range.x0..=range.x1 {
                guards.push((lx, ly, self.cells[self.cell_slot(lx, ly)].write().unwrap()));
            }
        }
        guards
    }

    /// Drop guards in reverse acquisition order.
    fn release<G>(mut guards: Vec<G>) {
        while guards.pop().is_some() {}
    }

    // ── queries ──────────────────────────────────────────────────────────

    /// Whether no entry intersects `rect`.
    ///
    /// The answer is consistent at one instant but may be stale by the
    /// time the caller acts on it; claim-and-check belongs in
    /// [`try_insert`](Self::try_insert).
    pub fn check_if_free(&self, rect: &CellRect) -> bool {
        self.check_rect(rect);
        let guards = self.read_cells(self.lock_range(rect));
        let mut free = true;
        'scan: for (lx, ly, cell) in &guards {
            for slot in self.bucket_slots(*lx, *ly, rect) {
                if cell.buckets[slot].iter().any(|e| e.rect.intersects(rect)) {
                    free = false;
                    break 'scan;
                }
            }
        }
        Self::release(guards);
        free
    }

    /// Remove every entry intersecting `rect`, regardless of data.
    pub fn erase(&self, rect: &CellRect) -> usize {
        self.erase_where(rect, |_, _| true)
    }

    /// Remove every entry intersecting `rect` for which the predicate
    /// holds, from every bucket that held a replica. Returns the number
    /// of distinct rectangles removed.
    ///
    /// The predicate may run more than once per entry (once per replica,
    /// and again during removal); it must be a pure function of its
    /// arguments.
    ///
    /// A matched entry can extend past `rect` into buckets outside the
    /// initially locked region. In that case the locks are released and
    /// re-acquired over the widened region until it is stable, then all
    /// replicas are removed under the final lock set; matches are
    /// re-evaluated after each widening, so nothing inserted in between
    /// is missed or half-removed.
    pub fn erase_where(
        &self,
        rect: &CellRect,
        mut pred: impl FnMut(&CellRect, &T) -> bool,
    ) -> usize {
        self.check_rect(rect);
        let mut region = *rect;
        loop {
            let mut guards = self.write_cells(self.lock_range(&region));

            let mut matched: Vec<CellRect> = Vec::new();
            let mut widened = region;
            for (lx, ly, cell) in &guards {
                for slot in self.bucket_slots(*lx, *ly, &region) {
                    for entry in &cell.buckets[slot] {
                        if entry.rect.intersects(rect)
                            && pred(&entry.rect, &entry.data)
                            && !matched.contains(&entry.rect)
                        {
                            matched.push(entry.rect);
                            widened.min = widened.min.component_min(entry.rect.min);
                            widened.max = widened.max.component_max(entry.rect.max);
                        }
                    }
                }
            }
            if widened != region {
                Self::release(guards);
                region = widened;
                continue;
            }

            for (lx, ly, cell) in guards.iter_mut() {
                for slot in self.bucket_slots(*lx, *ly, &region) {
                    cell.buckets[slot]
                        .retain(|e| !(e.rect.intersects(rect) && pred(&e.rect, &e.data)));
                }
            }
            Self::release(guards);
            return matched.len();
        }
    }
}

impl<T: Clone> SpatialIndex<T> {
    fn insert_into(
        &self,
        guards: &mut [(u32, u32, RwLockWriteGuard<'_, LockCell<T>>)],
        rect: CellRect,
        data: T,
    ) {
        for (lx, ly, cell) in guards.iter_mut() {
            for slot in self.bucket_slots(*lx, *ly, &rect) {
                cell.buckets[slot].push(Entry {
                    rect,
                    data: data.clone(),
                });
            }
        }
    }

    /// Insert `(rect, data)` iff no existing entry intersects `rect`.
    ///
    /// The emptiness check and the insertion happen under the same write
    /// guards, so two racing `try_insert`s on overlapping rectangles
    /// cannot both succeed.
    pub fn try_insert(&self, rect: &CellRect, data: T) -> bool {
        self.check_rect(rect);
        let mut guards = self.write_cells(self.lock_range(rect));
        let mut free = true;
        'scan: for (lx, ly, cell) in &guards {
            for slot in self.bucket_slots(*lx, *ly, rect) {
                if cell.buckets[slot].iter().any(|e| e.rect.intersects(rect)) {
                    free = false;
                    break 'scan;
                }
            }
        }
        if free {
            self.insert_into(&mut guards, *rect, data);
        }
        Self::release(guards);
        free
    }

    /// Insert `(rect, data)` without checking for intersections.
    ///
    /// For callers that have already proven the space free under their own
    /// serialization, or that deliberately stack entries.
    pub fn insert_unchecked(&self, rect: &CellRect, data: T) {
        self.check_rect(rect);
        let mut guards = self.write_cells(self.lock_range(rect));
        self.insert_into(&mut guards, *rect, data);
        Self::release(guards);
    }

    /// Every distinct entry intersecting `rect`, keyed by entry rectangle.
    ///
    /// Replicated copies of one entry collapse onto their shared key; the
    /// map preserves first-encounter order, which is deterministic for a
    /// given index state.
    pub fn get_overlapping(&self, rect: &CellRect) -> IndexMap<CellRect, T> {
        self.check_rect(rect);
        let mut found = IndexMap::new();
        let guards = self.read_cells(self.lock_range(rect));
        for (lx, ly, cell) in &guards {
            for slot in self.bucket_slots(*lx, *ly, rect) {
                for entry in &cell.buckets[slot] {
                    if entry.rect.intersects(rect) {
                        found
                            .entry(entry.rect)
                            .or_insert_with(|| entry.data.clone());
                    }
                }
            }
        }
        Self::release(guards);
        found
    }
}
