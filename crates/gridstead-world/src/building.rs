//! The per-world building footprint registry.

use std::sync::Arc;

use gridstead_core::{BuildingId, CellPoint, CellRect};
use gridstead_index::{IndexConfig, SpatialIndex};
use indexmap::IndexMap;

use crate::pipe::TaskPipe;

/// Building footprints of one world, backed by the concurrent spatial
/// index and a serialized mutation pipe.
///
/// The index itself is zero-based; callers speak world coordinates, and
/// the system centres the index on the world origin by offsetting every
/// rectangle by half the index extent. A footprint is therefore valid
/// anywhere inside [`bounds`](Self::bounds), negative coordinates
/// included.
///
/// Mutations come in two flavours. The `*_async` operations enqueue on
/// the pipe, so independent submitters (placement, demolition) execute
/// in submission order without blocking each other. The synchronous
/// operations act on the index directly under its own lock striping;
/// [`try_claim`](Self::try_claim) in particular is the atomic
/// check-and-reserve used by placement flows that must know the outcome
/// before mutating anything else.
pub struct BuildingSystem {
    index: Arc<SpatialIndex<BuildingId>>,
    offset: CellPoint,
    pipe: TaskPipe,
}

impl BuildingSystem {
    /// Create an empty system over an index with the given geometry.
    pub fn new(config: IndexConfig) -> Self {
        let offset = CellPoint::new(config.width() as i32 / 2, config.height() as i32 / 2);
        Self {
            index: Arc::new(SpatialIndex::new(config)),
            offset,
            pipe: TaskPipe::new(),
        }
    }

    /// The world-coordinate extent footprints may occupy.
    pub fn bounds(&self) -> CellRect {
        self.index.bounds().translated(-self.offset)
    }

    fn to_index(&self, rect: &CellRect) -> CellRect {
        rect.translated(self.offset)
    }

    fn to_world(&self, rect: &CellRect) -> CellRect {
        rect.translated(-self.offset)
    }

    // ── synchronous operations ───────────────────────────────────────────

    /// Whether no footprint overlaps `rect` right now. May be stale by
    /// the time the caller acts; use [`try_claim`](Self::try_claim) to
    /// reserve.
    pub fn is_free(&self, rect: &CellRect) -> bool {
        self.index.check_if_free(&self.to_index(rect))
    }

    /// Atomically reserve `footprint` for `id` iff it is free.
    pub fn try_claim(&self, footprint: &CellRect, id: BuildingId) -> bool {
        self.index.try_insert(&self.to_index(footprint), id)
    }

    /// Release `footprint` if it is held by `id`. Returns whether a
    /// footprint was removed.
    pub fn release(&self, footprint: &CellRect, id: BuildingId) -> bool {
        self.index
            .erase_where(&self.to_index(footprint), |_, owner| *owner == id)
            > 0
    }

    /// Remove every footprint overlapping `rect`, returning how many.
    pub fn erase_overlapped(&self, rect: &CellRect) -> usize {
        self.index.erase(&self.to_index(rect))
    }

    /// Every footprint overlapping `rect`, keyed by world-coordinate
    /// footprint.
    pub fn overlapped_buildings(&self, rect: &CellRect) -> IndexMap<CellRect, BuildingId> {
        self.index
            .get_overlapping(&self.to_index(rect))
            .into_iter()
            .map(|(found, id)| (self.to_world(&found), id))
            .collect()
    }

    // ── pipelined operations ─────────────────────────────────────────────

    /// Enqueue a footprint insertion. Declined silently if the space was
    /// taken by the time the task runs; callers that must know the
    /// outcome use [`try_claim`](Self::try_claim) instead.
    pub fn add_building_async(&self, footprint: &CellRect, id: BuildingId) {
        let index = Arc::clone(&self.index);
        let footprint = self.to_index(footprint);
        self.pipe.submit(move || {
            index.try_insert(&footprint, id);
        });
    }

    /// Enqueue removal of every footprint overlapping `rect`.
    pub fn remove_overlapped_async(&self, rect: &CellRect) {
        let index = Arc::clone(&self.index);
        let rect = self.to_index(rect);
        self.pipe.submit(move || {
            index.erase(&rect);
        });
    }

    /// Enqueue removal of `id`'s footprints overlapping `rect`.
    pub fn remove_building_async(&self, rect: &CellRect, id: BuildingId) {
        let index = Arc::clone(&self.index);
        let rect = self.to_index(rect);
        self.pipe.submit(move || {
            index.erase_where(&rect, |_, owner| *owner == id);
        });
    }

    /// Enqueue an overlap query; `callback` runs on the pipe worker with
    /// the result, ordered after every mutation already submitted.
    pub fn overlapped_buildings_async(
        &self,
        rect: &CellRect,
        callback: impl FnOnce(IndexMap<CellRect, BuildingId>) + Send + 'static,
    ) {
        let index = Arc::clone(&self.index);
        let rect = self.to_index(rect);
        let offset = self.offset;
        self.pipe.submit(move || {
            let found = index
                .get_overlapping(&rect)
                .into_iter()
                .map(|(found, id)| (found.translated(-offset), id))
                .collect();
            callback(found);
        });
    }

    /// Block until every operation submitted so far has been applied.
    pub fn wait_until_idle(&self) {
        self.pipe.wait_until_empty();
    }
}
