//! Interactive path preview: transient route cells, committed as
//! straight segments.

use gridstead_core::CellPoint;
use gridstead_grid::LayerKind;
use gridstead_nav::{find_path, GridNavAdapter, NavFilter};

use crate::error::PathError;
use crate::world::World;

/// An uncommitted path being laid from a fixed anchor cell.
///
/// [`update`](Self::update) recomputes the route to the current target
/// with a budgeted A* over the live grid; the leading-axis toggle picks
/// which leg of an L-shaped route comes first, matching the two ways a
/// player can drag out a corner. Nothing touches world state until
/// [`commit`](Self::commit), which splits the route into maximal
/// straight runs of cells that are not already road and registers each
/// run as a segment. [`cancel`](Self::cancel) simply discards the cells.
pub struct PathPreview {
    anchor: CellPoint,
    cells: Vec<CellPoint>,
    leading_axis_x: bool,
}

impl PathPreview {
    /// Start a preview anchored at `anchor`.
    pub fn new(anchor: CellPoint) -> Self {
        Self {
            anchor,
            cells: Vec::new(),
            leading_axis_x: true,
        }
    }

    /// The anchor cell the route always starts from.
    pub fn anchor(&self) -> CellPoint {
        self.anchor
    }

    /// The current route cells, anchor first. Empty when the target is
    /// unreachable or no update has run.
    pub fn cells(&self) -> &[CellPoint] {
        &self.cells
    }

    /// Flip which axis the route travels first.
    pub fn toggle_leading_axis(&mut self) {
        self.leading_axis_x = !self.leading_axis_x;
    }

    /// Recompute the route from the anchor to `target` over the world's
    /// current occupancy. Roads are traversable; buildings and obstacles
    /// are not.
    pub fn update(&mut self, world: &World, target: CellPoint) {
        let registry = world.registry().read().unwrap();
        let adapter = GridNavAdapter::new(&registry, LayerKind::Road);
        let filter = NavFilter::prefer_leading_axis(self.leading_axis_x);
        self.cells = find_path(&adapter, self.anchor, target, &filter);
    }

    /// Register the previewed route as path segments; returns how many
    /// segments were laid.
    ///
    /// Cells that already carry road are skipped, so a route drawn over
    /// an existing network only fills the gaps. The remaining cells are
    /// grouped into maximal straight runs of adjacent cells, each
    /// registered with one call; a corner therefore becomes two
    /// segments meeting at the turn cell. The preview is consumed; on a
    /// declined segment the error is returned and later runs are not
    /// attempted.
    pub fn commit(&mut self, world: &World) -> Result<usize, PathError> {
        let cells = std::mem::take(&mut self.cells);
        let mut segments = 0;
        // (start, last) of the straight run being accumulated.
        let mut run: Option<(CellPoint, CellPoint)> = None;

        let mut flush = |run: &mut Option<(CellPoint, CellPoint)>,
                         segments: &mut usize|
         -> Result<(), PathError> {
            if let Some((start, last)) = run.take() {
                world.register_path(start, last)?;
                *segments += 1;
            }
            Ok(())
        };

        for &cell in &cells {
            if world.is_road(cell) {
                flush(&mut run, &mut segments)?;
                continue;
            }
            run = match run {
                None => Some((cell, cell)),
                Some((start, last)) => {
                    let straight = (start.x == last.x && last.x == cell.x)
                        || (start.y == last.y && last.y == cell.y);
                    if straight && last.is_adjacent(cell) {
                        Some((start, cell))
                    } else {
                        world.register_path(start, last)?;
                        segments += 1;
                        Some((cell, cell))
                    }
                }
            };
        }
        flush(&mut run, &mut segments)?;
        Ok(segments)
    }

    /// Discard the previewed route without touching world state.
    pub fn cancel(&mut self) {
        self.cells.clear();
    }
}
