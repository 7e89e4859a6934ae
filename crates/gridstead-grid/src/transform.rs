//! World-space to cell-space conversion.

use gridstead_core::{CellPoint, CellRect};

/// Converts between world-space positions and cell coordinates.
///
/// The grid is axis-aligned with the world axes; cell `(x, y)` covers the
/// world square `[x·s, (x+1)·s) × [y·s, (y+1)·s)` for cell size `s`.
#[derive(Clone, Copy, Debug)]
pub struct GridTransform {
    cell_size: f64,
}

impl GridTransform {
    /// Create a transform with the given world-units-per-cell size.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not strictly positive and finite.
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell size must be positive and finite, got {cell_size}"
        );
        Self { cell_size }
    }

    /// World units per cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// The cell containing the world-space point `(x, y)`.
    pub fn cell_coords(&self, x: f64, y: f64) -> CellPoint {
        CellPoint::new(
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// The cell rect between two world-space corners.
    pub fn cell_rect(&self, min: (f64, f64), max: (f64, f64)) -> CellRect {
        CellRect::new(self.cell_coords(min.0, min.1), self.cell_coords(max.0, max.1))
    }

    /// World-space position of a cell's minimum corner.
    pub fn cell_corner(&self, cell: CellPoint) -> (f64, f64) {
        (
            f64::from(cell.x) * self.cell_size,
            f64::from(cell.y) * self.cell_size,
        )
    }

    /// World-space position of a cell's centre.
    pub fn cell_center(&self, cell: CellPoint) -> (f64, f64) {
        (
            (f64::from(cell.x) + 0.5) * self.cell_size,
            (f64::from(cell.y) + 0.5) * self.cell_size,
        )
    }

    /// Snap a world-space scalar to the nearest cell boundary.
    pub fn snap(&self, value: f64) -> f64 {
        (value / self.cell_size).round() * self.cell_size
    }
}

impl Default for GridTransform {
    /// One hundred world units per cell, the reference cell size.
    fn default() -> Self {
        Self { cell_size: 100.0 }
    }
}
