//! The traversability seam between occupancy storage and the search.

use gridstead_core::{CellPoint, GridDirection};
use gridstead_grid::{GridRegistry, LayerKind};
use smallvec::SmallVec;

/// A grid the search can walk over.
///
/// Implementations only decide per-cell traversability; neighbour
/// enumeration is fixed to the four axis-adjacent cells in canonical
/// `N, E, S, W` order so searches expand deterministically.
pub trait NavGrid {
    /// Whether the search may stand on this cell.
    fn is_traversable(&self, coords: CellPoint) -> bool;

    /// The traversable axis-adjacent cells, in canonical direction order.
    fn neighbours(&self, coords: CellPoint) -> SmallVec<[CellPoint; 4]> {
        GridDirection::ALL
            .iter()
            .map(|d| d.adjacent(coords))
            .filter(|&next| self.is_traversable(next))
            .collect()
    }
}

impl<F> NavGrid for F
where
    F: Fn(CellPoint) -> bool,
{
    fn is_traversable(&self, coords: CellPoint) -> bool {
        self(coords)
    }
}

/// [`NavGrid`] over the grid registry with placement traversal rules.
///
/// A cell is traversable when it lies inside a registered area and is
/// not blocked. Nature obstacles always block; construction blocks
/// unless the cell also carries the adapter's path layer, so routes may
/// run along existing paths but never through buildings.
pub struct GridNavAdapter<'a> {
    registry: &'a GridRegistry,
    path_layer: LayerKind,
}

impl<'a> GridNavAdapter<'a> {
    /// Create an adapter reading from `registry`, treating `path_layer`
    /// cells as walkable construction.
    pub fn new(registry: &'a GridRegistry, path_layer: LayerKind) -> Self {
        Self {
            registry,
            path_layer,
        }
    }

    fn is_blocked(&self, coords: CellPoint) -> bool {
        let obstacle = self.registry.cell(LayerKind::NatureObstacle, coords);
        let construction = self.registry.cell(LayerKind::Construction, coords);
        let path = self.registry.cell(self.path_layer, coords);
        obstacle || (construction && !path)
    }
}

impl NavGrid for GridNavAdapter<'_> {
    fn is_traversable(&self, coords: CellPoint) -> bool {
        self.registry.is_in_grid(coords) && !self.is_blocked(coords)
    }
}
