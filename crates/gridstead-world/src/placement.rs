//! Placement orchestration: the flows that tie the grid registry, the
//! building index, and the path graphs together.
//!
//! Every flow here either fully applies or fully declines; a declined
//! placement leaves the registry, the index, and the graphs untouched.

use gridstead_core::{BuildingId, CellPoint, CellRect, GridDirection};
use gridstead_grid::LayerKind;
use gridstead_path::placement::{
    connection_over_path_cell, registration_delta, unregistration_border_delta, vertex_connections,
    vertices_in_rect,
};

use crate::error::{PathError, PlacementError};
use crate::paths::PathGraphKind;
use crate::world::World;

impl World {
    /// Whether a building footprint could be placed right now: wholly
    /// inside one area and free of obstacles, construction, and uncovered
    /// cells. Advisory; [`place_building`](Self::place_building) re-checks
    /// under the write lock.
    pub fn can_place(&self, footprint: &CellRect) -> bool {
        let registry = self.registry().read().unwrap();
        registry.is_in_single_area(footprint) && !registry.is_occupied(footprint)
    }

    /// Place a building: validate the footprint against the grid, reserve
    /// it in the spatial index, and mark its cells as construction.
    ///
    /// The index reservation is the atomic step; the grid cells are only
    /// marked once it succeeds, so a decline at any stage leaves no
    /// partial mutation.
    pub fn place_building(
        &self,
        footprint: &CellRect,
        id: BuildingId,
    ) -> Result<(), PlacementError> {
        let mut registry = self.registry().write().unwrap();
        if !registry.is_in_single_area(footprint) {
            return Err(PlacementError::CrossesAreaBoundary {
                footprint: *footprint,
            });
        }
        if registry.is_occupied(footprint) {
            return Err(PlacementError::Obstructed {
                footprint: *footprint,
            });
        }
        if !self.buildings().try_claim(footprint, id) {
            return Err(PlacementError::FootprintTaken {
                footprint: *footprint,
            });
        }
        registry.set_cells_in(LayerKind::Construction, footprint, true);
        Ok(())
    }

    /// Remove a building placed by [`place_building`](Self::place_building).
    /// Returns whether `id` actually held the footprint.
    pub fn remove_building(&self, footprint: &CellRect, id: BuildingId) -> bool {
        let mut registry = self.registry().write().unwrap();
        if !self.buildings().release(footprint, id) {
            return false;
        }
        registry.set_cells_in(LayerKind::Construction, footprint, false);
        true
    }

    /// Remove every building overlapping `area`, clearing each removed
    /// footprint's construction cells. Returns how many were removed.
    pub fn demolish_in(&self, area: &CellRect) -> usize {
        let mut registry = self.registry().write().unwrap();
        let overlapped = self.buildings().overlapped_buildings(area);
        for footprint in overlapped.keys() {
            registry.set_cells_in(LayerKind::Construction, footprint, false);
        }
        self.buildings().erase_overlapped(area)
    }

    /// Register a straight path segment between two cells, inclusive.
    ///
    /// The endpoints must share an axis (`from == to` lays a single
    /// cell). Marks the covered cells as construction and road, derives
    /// the graph delta from the updated occupancy, and submits it to the
    /// road graph's pipe.
    pub fn register_path(&self, from: CellPoint, to: CellPoint) -> Result<(), PathError> {
        if !from.shares_axis(to) {
            return Err(PathError::NotAxisAligned { from, to });
        }
        let rect = CellRect::spanning(from, to);

        let mut registry = self.registry().write().unwrap();
        if !registry.is_in_single_area(&rect) {
            return Err(PathError::CrossesAreaBoundary { rect });
        }
        for coords in rect.cells() {
            let blocked = registry.cell(LayerKind::NatureObstacle, coords)
                || (registry.cell(LayerKind::Construction, coords)
                    && !registry.cell(LayerKind::Road, coords));
            if blocked {
                return Err(PathError::Obstructed { rect, at: coords });
            }
        }

        registry.set_cells_in(LayerKind::Construction, &rect, true);
        registry.set_cells_in(LayerKind::Road, &rect, true);

        let is_path = |coords: CellPoint| registry.cell(LayerKind::Road, coords);
        let delta = registration_delta(&rect, &is_path);
        self.paths().update_graph_async(PathGraphKind::Road, delta);
        Ok(())
    }

    /// Unregister every road cell inside `rect`, keeping the road graph
    /// consistent.
    ///
    /// Two analysis passes bracket the occupancy clear: border cells are
    /// classified while the rectangle still reads as road (their current
    /// patterns decide promotion and demotion), and replacement corridor
    /// edges are derived afterwards, from what actually remains. Returns
    /// the number of cells cleared.
    pub fn unregister_path(&self, rect: &CellRect) -> usize {
        let mut registry = self.registry().write().unwrap();

        let (mut delta, demoted_border, road_cells) = {
            let is_path = |coords: CellPoint| registry.cell(LayerKind::Road, coords);
            let mut delta = unregistration_border_delta(rect, &is_path);
            let demoted_border = delta.vertices_to_remove.clone();
            // Interior vertices vanish with their cells.
            delta
                .vertices_to_remove
                .extend(vertices_in_rect(rect, &is_path));
            let road_cells: Vec<CellPoint> = rect.cells().filter(|&c| is_path(c)).collect();
            (delta, demoted_border, road_cells)
        };

        for &coords in &road_cells {
            registry.set_cell(LayerKind::Road, coords, false);
            registry.set_cell(LayerKind::Construction, coords, false);
        }

        let is_path = |coords: CellPoint| registry.cell(LayerKind::Road, coords);
        // Each demoted border vertex is now mid-corridor; bridge the
        // vertices either side of it. Probing one direction per axis
        // covers both ways, and the non-corridor axis records nothing.
        for &coords in &demoted_border {
            connection_over_path_cell(
                coords,
                GridDirection::North,
                &is_path,
                &mut delta.connections_to_add,
            );
            connection_over_path_cell(
                coords,
                GridDirection::East,
                &is_path,
                &mut delta.connections_to_add,
            );
        }
        vertex_connections(&delta.vertices_to_add, &is_path, &mut delta.connections_to_add);

        if !delta.is_empty() {
            self.paths().update_graph_async(PathGraphKind::Road, delta);
        }
        road_cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldConfig;
    use gridstead_core::AreaId;
    use gridstead_grid::GridArea;
    use gridstead_index::IndexConfig;

    fn p(x: i32, y: i32) -> CellPoint {
        CellPoint::new(x, y)
    }

    fn rect(min: (i32, i32), max: (i32, i32)) -> CellRect {
        CellRect::new(min.into(), max.into())
    }

    fn world_with_area() -> (World, AreaId) {
        let world = World::new(WorldConfig {
            index: IndexConfig::new((64, 64), (4, 4), (16, 16)).unwrap(),
            ..WorldConfig::default()
        });
        let id = world
            .register_area(GridArea::new(rect((0, 0), (16, 16))))
            .unwrap();
        (world, id)
    }

    // ── buildings ────────────────────────────────────────────────────────

    #[test]
    fn placing_marks_construction_and_claims_the_index() {
        let (world, _) = world_with_area();
        let footprint = rect((2, 2), (4, 4));
        world.place_building(&footprint, BuildingId(1)).unwrap();

        let registry = world.registry().read().unwrap();
        assert!(registry.cell(LayerKind::Construction, p(2, 2)));
        assert!(registry.cell(LayerKind::Construction, p(3, 3)));
        drop(registry);
        assert!(!world.buildings().is_free(&footprint));
        assert!(!world.can_place(&rect((3, 3), (5, 5))));
    }

    #[test]
    fn overlapping_placement_is_declined_without_mutation() {
        let (world, _) = world_with_area();
        world.place_building(&rect((2, 2), (4, 4)), BuildingId(1)).unwrap();

        let err = world
            .place_building(&rect((3, 3), (5, 5)), BuildingId(2))
            .unwrap_err();
        assert_eq!(
            err,
            PlacementError::Obstructed {
                footprint: rect((3, 3), (5, 5))
            }
        );
        // The declined building left no trace on the fresh cell.
        let registry = world.registry().read().unwrap();
        assert!(!registry.cell(LayerKind::Construction, p(4, 4)));
        drop(registry);
        assert!(world.buildings().is_free(&rect((4, 4), (5, 5))));
    }

    #[test]
    fn straddling_placement_is_declined() {
        let (world, _) = world_with_area();
        world
            .register_area(GridArea::new(rect((16, 0), (32, 16))))
            .unwrap();
        let err = world
            .place_building(&rect((14, 2), (18, 4)), BuildingId(1))
            .unwrap_err();
        assert_eq!(
            err,
            PlacementError::CrossesAreaBoundary {
                footprint: rect((14, 2), (18, 4))
            }
        );
    }

    #[test]
    fn index_claim_conflict_is_surfaced() {
        let (world, _) = world_with_area();
        // Someone claimed the footprint directly in the index, without
        // grid cells; placement must notice and decline cleanly.
        assert!(world.buildings().try_claim(&rect((2, 2), (4, 4)), BuildingId(9)));
        let err = world
            .place_building(&rect((2, 2), (4, 4)), BuildingId(1))
            .unwrap_err();
        assert_eq!(
            err,
            PlacementError::FootprintTaken {
                footprint: rect((2, 2), (4, 4))
            }
        );
        assert!(!world.registry().read().unwrap().cell(LayerKind::Construction, p(2, 2)));
    }

    #[test]
    fn removal_restores_placeability() {
        let (world, _) = world_with_area();
        let footprint = rect((2, 2), (4, 4));
        world.place_building(&footprint, BuildingId(1)).unwrap();
        assert!(!world.remove_building(&footprint, BuildingId(2)));
        assert!(world.remove_building(&footprint, BuildingId(1)));
        assert!(world.can_place(&footprint));
    }

    #[test]
    fn demolish_clears_every_overlapped_building() {
        let (world, _) = world_with_area();
        world.place_building(&rect((1, 1), (3, 3)), BuildingId(1)).unwrap();
        world.place_building(&rect((5, 1), (7, 3)), BuildingId(2)).unwrap();
        world.place_building(&rect((1, 9), (3, 11)), BuildingId(3)).unwrap();

        assert_eq!(world.demolish_in(&rect((0, 0), (8, 4))), 2);
        assert!(world.can_place(&rect((1, 1), (7, 3))));
        assert!(!world.buildings().is_free(&rect((1, 9), (3, 11))));
    }

    // ── paths ────────────────────────────────────────────────────────────

    #[test]
    fn straight_path_registers_endpoints_and_edge() {
        let (world, _) = world_with_area();
        world.register_path(p(0, 8), p(7, 8)).unwrap();
        world.wait_until_idle();

        let graph = world.paths().graph(PathGraphKind::Road);
        assert_eq!(graph.len(), 2);
        assert!(graph.are_connected(p(0, 8), p(7, 8)));
        drop(graph);
        assert!(world.is_road(p(3, 8)));
        // Roads occupy: a building cannot land on one.
        assert!(!world.can_place(&rect((3, 7), (5, 9))));
    }

    #[test]
    fn diagonal_segment_is_declined() {
        let (world, _) = world_with_area();
        let err = world.register_path(p(0, 0), p(3, 4)).unwrap_err();
        assert_eq!(
            err,
            PathError::NotAxisAligned {
                from: p(0, 0),
                to: p(3, 4)
            }
        );
        assert!(!world.is_road(p(0, 0)));
    }

    #[test]
    fn path_through_a_building_is_declined() {
        let (world, _) = world_with_area();
        world.place_building(&rect((3, 7), (5, 9)), BuildingId(1)).unwrap();
        let err = world.register_path(p(0, 8), p(7, 8)).unwrap_err();
        assert_eq!(
            err,
            PathError::Obstructed {
                rect: rect((0, 8), (8, 9)),
                at: p(3, 8)
            }
        );
        assert!(!world.is_road(p(0, 8)));
    }

    #[test]
    fn single_cell_path_is_an_isolated_vertex() {
        let (world, _) = world_with_area();
        world.register_path(p(4, 4), p(4, 4)).unwrap();
        world.wait_until_idle();
        let graph = world.paths().graph(PathGraphKind::Road);
        assert_eq!(graph.len(), 1);
        assert!(graph.is_vertex(p(4, 4)));
    }

    #[test]
    fn branch_promotes_the_junction_cell() {
        let (world, _) = world_with_area();
        world.register_path(p(0, 8), p(7, 8)).unwrap();
        world.register_path(p(3, 9), p(3, 12)).unwrap();
        world.wait_until_idle();

        let graph = world.paths().graph(PathGraphKind::Road);
        assert_eq!(graph.len(), 4);
        assert!(graph.is_vertex(p(3, 8)));
        assert!(graph.are_connected(p(0, 8), p(3, 8)));
        assert!(graph.are_connected(p(3, 8), p(7, 8)));
        assert!(graph.are_connected(p(3, 8), p(3, 12)));
        assert!(!graph.are_connected(p(0, 8), p(7, 8)));
    }

    #[test]
    fn unregistering_a_branch_restores_the_through_edge() {
        let (world, _) = world_with_area();
        world.register_path(p(0, 8), p(7, 8)).unwrap();
        world.register_path(p(3, 9), p(3, 12)).unwrap();
        assert_eq!(world.unregister_path(&rect((3, 9), (4, 13))), 4);
        world.wait_until_idle();

        let graph = world.paths().graph(PathGraphKind::Road);
        assert_eq!(graph.len(), 2);
        assert!(graph.are_connected(p(0, 8), p(7, 8)));
        drop(graph);
        assert!(!world.is_road(p(3, 10)));
        // The cleared cells are placeable again.
        assert!(world.can_place(&rect((3, 9), (4, 13))));
    }

    #[test]
    fn unregistering_mid_run_splits_the_path() {
        let (world, _) = world_with_area();
        world.register_path(p(0, 8), p(8, 8)).unwrap();
        assert_eq!(world.unregister_path(&rect((3, 8), (6, 9))), 3);
        world.wait_until_idle();

        let graph = world.paths().graph(PathGraphKind::Road);
        assert_eq!(graph.len(), 4);
        assert!(graph.are_connected(p(0, 8), p(2, 8)));
        assert!(graph.are_connected(p(6, 8), p(8, 8)));
        assert!(!graph.are_connected(p(2, 8), p(6, 8)));
    }

    #[test]
    fn unregistering_clear_ground_is_a_no_op() {
        let (world, _) = world_with_area();
        assert_eq!(world.unregister_path(&rect((4, 4), (8, 8))), 0);
        world.wait_until_idle();
        assert!(world.paths().graph(PathGraphKind::Road).is_empty());
    }
}
