//! The per-world set of registered grid areas.

use gridstead_core::{AreaId, CellPoint, CellRect};

use crate::area::{GridArea, LayerKind};
use crate::error::RegisterError;

/// All registered areas of one world, with global-coordinate routing.
///
/// Areas never overlap; registration is declined rather than clipped when
/// bounds collide. Lookup is a linear scan over the area list, which is
/// short (a handful of islands or map chunks), kept in a `Vec` for
/// iteration locality with swap-remove on unregistration.
#[derive(Default)]
pub struct GridRegistry {
    areas: Vec<(AreaId, GridArea)>,
    next_id: u64,
}

impl GridRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an area, claiming its bounds.
    ///
    /// Returns the new area's id, or declines when the bounds overlap an
    /// already registered area.
    pub fn register(&mut self, area: GridArea) -> Result<AreaId, RegisterError> {
        let bounds = area.bounds();
        if let Some((existing, _)) = self
            .areas
            .iter()
            .find(|(_, other)| other.bounds().intersects(&bounds))
        {
            return Err(RegisterError::Overlaps {
                bounds,
                existing: *existing,
            });
        }
        let id = AreaId(self.next_id);
        self.next_id += 1;
        self.areas.push((id, area));
        Ok(id)
    }

    /// Remove an area, releasing its bounds. Returns the area, or `None`
    /// for an unknown id.
    pub fn unregister(&mut self, id: AreaId) -> Option<GridArea> {
        let pos = self.areas.iter().position(|(other, _)| *other == id)?;
        Some(self.areas.swap_remove(pos).1)
    }

    /// Number of registered areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Whether no areas are registered.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Look up an area by id.
    pub fn area(&self, id: AreaId) -> Option<&GridArea> {
        self.areas
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, area)| area)
    }

    /// Look up an area by id, mutably.
    pub fn area_mut(&mut self, id: AreaId) -> Option<&mut GridArea> {
        self.areas
            .iter_mut()
            .find(|(other, _)| *other == id)
            .map(|(_, area)| area)
    }

    /// The area containing a global cell, if any.
    pub fn area_at(&self, coords: CellPoint) -> Option<(AreaId, &GridArea)> {
        self.areas
            .iter()
            .find(|(_, area)| area.contains(coords))
            .map(|(id, area)| (*id, area))
    }

    /// All areas whose bounds intersect `rect`.
    pub fn areas_in<'a>(
        &'a self,
        rect: &'a CellRect,
    ) -> impl Iterator<Item = (AreaId, &'a GridArea)> {
        self.areas
            .iter()
            .filter(move |(_, area)| area.bounds().intersects(rect))
            .map(|(id, area)| (*id, area))
    }

    /// Whether a global cell lies inside some registered area.
    pub fn is_in_grid(&self, coords: CellPoint) -> bool {
        self.area_at(coords).is_some()
    }

    /// Whether the whole of `rect` lies inside one registered area.
    ///
    /// Areas are rectangles and never overlap, so it suffices to find the
    /// area holding the min corner and check it also holds the max cell.
    pub fn is_in_single_area(&self, rect: &CellRect) -> bool {
        if rect.is_empty() {
            return false;
        }
        match self.area_at(rect.min) {
            Some((_, area)) => area.contains(rect.max - CellPoint::new(1, 1)),
            None => false,
        }
    }

    /// Read one cell of a layer; `false` outside every area.
    pub fn cell(&self, kind: LayerKind, coords: CellPoint) -> bool {
        match self.area_at(coords) {
            Some((_, area)) => area.cell(kind, coords),
            None => false,
        }
    }

    /// Write one cell of a layer. A cell outside every area is ignored.
    pub fn set_cell(&mut self, kind: LayerKind, coords: CellPoint, value: bool) {
        if let Some(entry) = self
            .areas
            .iter_mut()
            .find(|(_, area)| area.contains(coords))
        {
            entry.1.set_cell(kind, coords, value);
        }
    }

    /// Whether any covered cell of `rect` has the layer bit equal to
    /// `value`. Cells outside every area are not considered.
    pub fn has_cell_in(&self, kind: LayerKind, rect: &CellRect, value: bool) -> bool {
        self.areas
            .iter()
            .any(|(_, area)| area.has_cell_in(kind, rect, value))
    }

    /// Set the layer bit across `rect`, piecewise per intersecting area.
    pub fn set_cells_in(&mut self, kind: LayerKind, rect: &CellRect, value: bool) {
        for (_, area) in &mut self.areas {
            area.set_cells_in(kind, rect, value);
        }
    }

    /// Whether `rect` is blocked for placement.
    ///
    /// Blocked when any covered cell carries an obstacle or construction,
    /// or when some cell of `rect` is not covered by any area at all.
    /// Coverage is decided by comparing summed intersection areas against
    /// the rect's area, which is exact because areas never overlap.
    pub fn is_occupied(&self, rect: &CellRect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let mut covered = 0u64;
        for (_, area) in self.areas_in(rect) {
            if area.is_occupied(rect) {
                return true;
            }
            covered += area.bounds().intersection(rect).area();
        }
        covered != rect.area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(min: (i32, i32), max: (i32, i32)) -> CellRect {
        CellRect::new(min.into(), max.into())
    }

    fn registry_with(bounds: &[CellRect]) -> (GridRegistry, Vec<AreaId>) {
        let mut registry = GridRegistry::new();
        let ids = bounds
            .iter()
            .map(|b| registry.register(GridArea::new(*b)).unwrap())
            .collect();
        (registry, ids)
    }

    // ── registration ─────────────────────────────────────────────────────

    #[test]
    fn disjoint_areas_register_with_distinct_ids() {
        let (registry, ids) =
            registry_with(&[rect((0, 0), (8, 8)), rect((8, 0), (16, 8))]);
        assert_eq!(registry.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn overlapping_registration_is_declined() {
        let (mut registry, ids) = registry_with(&[rect((0, 0), (8, 8))]);
        let err = registry
            .register(GridArea::new(rect((4, 4), (12, 12))))
            .unwrap_err();
        assert_eq!(
            err,
            RegisterError::Overlaps {
                bounds: rect((4, 4), (12, 12)),
                existing: ids[0],
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregister_releases_bounds_and_keeps_ids_fresh() {
        let (mut registry, ids) = registry_with(&[rect((0, 0), (8, 8))]);
        let removed = registry.unregister(ids[0]).unwrap();
        assert_eq!(removed.bounds(), rect((0, 0), (8, 8)));
        assert!(registry.unregister(ids[0]).is_none());

        // The freed bounds can be reclaimed, under a new id.
        let new_id = registry.register(GridArea::new(rect((0, 0), (8, 8)))).unwrap();
        assert_ne!(new_id, ids[0]);
    }

    // ── routing ──────────────────────────────────────────────────────────

    #[test]
    fn area_at_routes_by_containment() {
        let (registry, ids) =
            registry_with(&[rect((0, 0), (8, 8)), rect((8, 0), (16, 8))]);
        assert_eq!(registry.area_at(CellPoint::new(3, 3)).unwrap().0, ids[0]);
        assert_eq!(registry.area_at(CellPoint::new(8, 0)).unwrap().0, ids[1]);
        assert!(registry.area_at(CellPoint::new(0, 9)).is_none());
    }

    #[test]
    fn single_area_containment_uses_both_corners() {
        let (registry, _) =
            registry_with(&[rect((0, 0), (8, 8)), rect((8, 0), (16, 8))]);
        assert!(registry.is_in_single_area(&rect((1, 1), (7, 7))));
        // Straddles the seam between the two areas.
        assert!(!registry.is_in_single_area(&rect((6, 1), (10, 3))));
        // Min corner outside every area.
        assert!(!registry.is_in_single_area(&rect((-2, 0), (2, 2))));
        assert!(!registry.is_in_single_area(&rect((1, 1), (1, 1))));
    }

    #[test]
    fn cell_writes_route_to_the_owning_area() {
        let (mut registry, _) =
            registry_with(&[rect((0, 0), (8, 8)), rect((8, 0), (16, 8))]);
        registry.set_cell(LayerKind::Road, CellPoint::new(9, 2), true);
        assert!(registry.cell(LayerKind::Road, CellPoint::new(9, 2)));
        assert!(!registry.cell(LayerKind::Road, CellPoint::new(7, 2)));
        // Outside every area: write ignored, read false.
        registry.set_cell(LayerKind::Road, CellPoint::new(30, 30), true);
        assert!(!registry.cell(LayerKind::Road, CellPoint::new(30, 30)));
    }

    #[test]
    fn rect_writes_split_across_the_seam() {
        let (mut registry, _) =
            registry_with(&[rect((0, 0), (8, 8)), rect((8, 0), (16, 8))]);
        let straddling = rect((6, 2), (10, 3));
        registry.set_cells_in(LayerKind::Construction, &straddling, true);
        for x in 6..10 {
            assert!(registry.cell(LayerKind::Construction, CellPoint::new(x, 2)));
        }
        assert!(!registry.cell(LayerKind::Construction, CellPoint::new(5, 2)));
        assert!(!registry.cell(LayerKind::Construction, CellPoint::new(10, 2)));
    }

    // ── occupancy ────────────────────────────────────────────────────────

    #[test]
    fn clear_covered_rect_is_free() {
        let (registry, _) = registry_with(&[rect((0, 0), (8, 8))]);
        assert!(!registry.is_occupied(&rect((1, 1), (5, 5))));
    }

    #[test]
    fn construction_or_obstacle_blocks() {
        let (mut registry, _) = registry_with(&[rect((0, 0), (8, 8))]);
        registry.set_cell(LayerKind::Construction, CellPoint::new(4, 4), true);
        assert!(registry.is_occupied(&rect((3, 3), (6, 6))));
        assert!(!registry.is_occupied(&rect((0, 0), (4, 4))));

        registry.set_cell(LayerKind::NatureObstacle, CellPoint::new(1, 1), true);
        assert!(registry.is_occupied(&rect((0, 0), (4, 4))));
    }

    #[test]
    fn uncovered_cells_count_as_occupied() {
        let (registry, _) = registry_with(&[rect((0, 0), (8, 8))]);
        // Partially off-grid.
        assert!(registry.is_occupied(&rect((6, 6), (10, 10))));
        // Entirely off-grid.
        assert!(registry.is_occupied(&rect((20, 20), (22, 22))));
    }

    #[test]
    fn seam_spanning_rect_is_free_when_both_sides_are_clear() {
        let (registry, _) =
            registry_with(&[rect((0, 0), (8, 8)), rect((8, 0), (16, 8))]);
        assert!(!registry.is_occupied(&rect((6, 2), (10, 4))));
    }
}
