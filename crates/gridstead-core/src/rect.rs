//! Half-open axis-aligned cell rectangles.

use std::fmt;

use crate::point::CellPoint;

/// An axis-aligned rectangle of cells, half-open on both axes:
/// a cell `c` is inside iff `min.x <= c.x < max.x && min.y <= c.y < max.y`.
///
/// A rectangle is empty iff `min.x >= max.x || min.y >= max.y`. Empty
/// rectangles contain no cells and intersect nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// Inclusive minimum corner.
    pub min: CellPoint,
    /// Exclusive maximum corner.
    pub max: CellPoint,
}

impl CellRect {
    /// Create a rectangle from its corners.
    pub const fn new(min: CellPoint, max: CellPoint) -> Self {
        Self { min, max }
    }

    /// The smallest rectangle covering both cells `a` and `b` inclusively.
    ///
    /// Used for axis-aligned path segments where either endpoint may be
    /// the smaller coordinate.
    pub fn spanning(a: CellPoint, b: CellPoint) -> Self {
        let min = a.component_min(b);
        let max = a.component_max(b) + CellPoint::new(1, 1);
        Self { min, max }
    }

    /// A 1×1 rectangle containing exactly `cell`.
    pub fn single(cell: CellPoint) -> Self {
        Self {
            min: cell,
            max: cell + CellPoint::new(1, 1),
        }
    }

    /// Width in cells; zero for empty rectangles.
    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x).max(0) as u32
    }

    /// Height in cells; zero for empty rectangles.
    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y).max(0) as u32
    }

    /// Number of cells covered.
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Whether the rectangle contains no cells.
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `cell` lies inside the rectangle.
    pub fn contains(&self, cell: CellPoint) -> bool {
        self.min.x <= cell.x && cell.x < self.max.x && self.min.y <= cell.y && cell.y < self.max.y
    }

    /// Whether the two rectangles share at least one cell.
    ///
    /// Touching edges do not count: `[0,2)` and `[2,4)` are disjoint.
    pub fn intersects(&self, other: &CellRect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// The overlapping region of two rectangles, empty if disjoint.
    pub fn intersection(&self, other: &CellRect) -> CellRect {
        CellRect {
            min: self.min.component_max(other.min),
            max: self.max.component_min(other.max),
        }
    }

    /// The rectangle shifted by `offset`.
    pub fn translated(&self, offset: CellPoint) -> CellRect {
        CellRect {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Iterate all cells of the rectangle in X-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellPoint> + '_ {
        let rect = *self;
        (rect.min.x..rect.max.x)
            .flat_map(move |x| (rect.min.y..rect.max.y).map(move |y| CellPoint::new(x, y)))
    }
}

impl fmt::Display for CellRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}
