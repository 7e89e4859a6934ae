//! Registered grid regions and their occupancy layers.

use gridstead_core::{CellPoint, CellRect};

use crate::layer::GridLayer;
use crate::terrain::{ObstacleConfig, TerrainProbe};
use crate::transform::GridTransform;

/// The occupancy channels every area carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Terrain-derived obstacles: slopes and holes no placement may cover.
    NatureObstacle = 0,
    /// Cells claimed by placed buildings and registered paths.
    Construction = 1,
    /// Cells carrying a path. A road cell is also a construction cell;
    /// the road channel distinguishes traversable construction.
    Road = 2,
}

impl LayerKind {
    /// Number of layer kinds.
    pub const COUNT: usize = 3;

    /// All kinds, in storage order.
    pub const ALL: [LayerKind; Self::COUNT] = [
        LayerKind::NatureObstacle,
        LayerKind::Construction,
        LayerKind::Road,
    ];
}

/// One registered rectangular region of the world.
///
/// An area owns one [`GridLayer`] per [`LayerKind`], all sized to its
/// bounds. Bounds and every coordinate in this API are global cell
/// coordinates; the area translates to layer-local space internally.
/// Rect arguments are clipped to the bounds, so callers may pass rects
/// that spill over the edge and only the covered part is touched.
pub struct GridArea {
    bounds: CellRect,
    layers: [GridLayer; LayerKind::COUNT],
}

impl GridArea {
    /// Create an area covering `bounds`, all layers unset.
    ///
    /// # Panics
    ///
    /// Panics if `bounds` is empty.
    pub fn new(bounds: CellRect) -> Self {
        assert!(!bounds.is_empty(), "grid area bounds must be non-empty");
        let layers =
            std::array::from_fn(|_| GridLayer::new(bounds.width(), bounds.height()));
        Self { bounds, layers }
    }

    /// The global-coordinate bounds this area covers.
    pub fn bounds(&self) -> CellRect {
        self.bounds
    }

    /// Whether the global cell lies inside this area.
    pub fn contains(&self, coords: CellPoint) -> bool {
        self.bounds.contains(coords)
    }

    fn to_local(&self, coords: CellPoint) -> CellPoint {
        coords - self.bounds.min
    }

    /// Read one cell of a layer.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `coords` lies inside the bounds.
    pub fn cell(&self, kind: LayerKind, coords: CellPoint) -> bool {
        debug_assert!(self.contains(coords), "cell {coords} outside area {}", self.bounds);
        self.layers[kind as usize].get(self.to_local(coords))
    }

    /// Write one cell of a layer.
    pub fn set_cell(&mut self, kind: LayerKind, coords: CellPoint, value: bool) {
        debug_assert!(self.contains(coords), "cell {coords} outside area {}", self.bounds);
        self.layers[kind as usize].set(self.to_local(coords), value);
    }

    /// Whether any cell of `rect` that falls inside this area has the
    /// layer bit equal to `value`.
    pub fn has_cell_in(&self, kind: LayerKind, rect: &CellRect, value: bool) -> bool {
        let clipped = rect.intersection(&self.bounds);
        if clipped.is_empty() {
            return false;
        }
        let local = clipped.translated(-self.bounds.min);
        self.layers[kind as usize].any_in_rect(&local, value)
    }

    /// Set the layer bit for every cell of `rect` inside this area.
    pub fn set_cells_in(&mut self, kind: LayerKind, rect: &CellRect, value: bool) {
        let clipped = rect.intersection(&self.bounds);
        if clipped.is_empty() {
            return;
        }
        let local = clipped.translated(-self.bounds.min);
        self.layers[kind as usize].set_rect(&local, value);
    }

    /// Whether the covered part of `rect` holds any obstacle or
    /// construction cell.
    pub fn is_occupied(&self, rect: &CellRect) -> bool {
        self.has_cell_in(LayerKind::NatureObstacle, rect, true)
            || self.has_cell_in(LayerKind::Construction, rect, true)
    }

    /// Derive the nature-obstacle layer from terrain heights.
    ///
    /// Samples the terrain at every cell corner (one probe per corner, a
    /// previous-column buffer keeps it O(area + perimeter)) and flags a
    /// cell when the mean of its four corner heights exceeds any single
    /// corner by more than the configured threshold. Missed probes report
    /// the sentinel height far below the map, so cells touching a hole are
    /// flagged by the same test; a cell whose four corners all miss sits
    /// exactly at the sentinel mean and is flagged explicitly.
    pub fn fill_obstacles<P: TerrainProbe + ?Sized>(
        &mut self,
        probe: &P,
        transform: &GridTransform,
        config: &ObstacleConfig,
    ) {
        let bounds = self.bounds;
        let miss = config.miss_height();
        let corner_rows = bounds.height() as usize + 1;

        let sample_column = |x: i32, out: &mut Vec<f64>| {
            out.clear();
            for y in bounds.min.y..=bounds.max.y {
                let (wx, wy) = transform.cell_corner(CellPoint::new(x, y));
                out.push(probe.height_at(wx, wy).unwrap_or(miss));
            }
        };

        let mut prev_col = Vec::with_capacity(corner_rows);
        let mut cur_col = Vec::with_capacity(corner_rows);
        sample_column(bounds.min.x, &mut prev_col);

        for x in bounds.min.x + 1..=bounds.max.x {
            sample_column(x, &mut cur_col);
            for row in 1..corner_rows {
                let corners = [
                    prev_col[row - 1],
                    prev_col[row],
                    cur_col[row - 1],
                    cur_col[row],
                ];
                let mean = corners.iter().sum::<f64>() / 4.0;
                let obstacle = mean == miss
                    || corners
                        .iter()
                        .any(|&c| mean - c > config.height_deviation_threshold);
                if obstacle {
                    let local =
                        CellPoint::new(x - 1 - bounds.min.x, row as i32 - 1);
                    self.layers[LayerKind::NatureObstacle as usize].set(local, true);
                }
            }
            std::mem::swap(&mut prev_col, &mut cur_col);
        }
    }
}
