//! Signed 2D integer cell coordinates.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A cell coordinate on the simulation grid.
///
/// The fundamental spatial unit: one grid-aligned unit square addressed
/// by signed integer coordinates. World-space positions are converted to
/// cell coordinates by the grid registry's transform; everything below
/// that boundary works purely in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPoint {
    /// X coordinate, in cells.
    pub x: i32,
    /// Y coordinate, in cells.
    pub y: i32,
}

impl CellPoint {
    /// The origin cell `(0, 0)`.
    pub const ZERO: CellPoint = CellPoint { x: 0, y: 0 };

    /// Create a cell coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum of two coordinates.
    pub fn component_min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Component-wise maximum of two coordinates.
    pub fn component_max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Manhattan distance to `other`.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Whether `other` is one of the four axis-adjacent cells.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Whether this coordinate shares exactly one axis with `other`
    /// (same row or same column, but not the same cell).
    pub fn shares_axis(self, other: Self) -> bool {
        (self.x == other.x) != (self.y == other.y)
    }
}

impl Add for CellPoint {
    type Output = CellPoint;

    fn add(self, rhs: CellPoint) -> CellPoint {
        CellPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for CellPoint {
    fn add_assign(&mut self, rhs: CellPoint) {
        *self = *self + rhs;
    }
}

impl Sub for CellPoint {
    type Output = CellPoint;

    fn sub(self, rhs: CellPoint) -> CellPoint {
        CellPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for CellPoint {
    fn sub_assign(&mut self, rhs: CellPoint) {
        *self = *self - rhs;
    }
}

impl Neg for CellPoint {
    type Output = CellPoint;

    fn neg(self) -> CellPoint {
        CellPoint::new(-self.x, -self.y)
    }
}

impl Mul<i32> for CellPoint {
    type Output = CellPoint;

    fn mul(self, rhs: i32) -> CellPoint {
        CellPoint::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(i32, i32)> for CellPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for CellPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_componentwise() {
        let a = CellPoint::new(3, -2);
        let b = CellPoint::new(-1, 5);
        assert_eq!(a + b, CellPoint::new(2, 3));
        assert_eq!(a - b, CellPoint::new(4, -7));
        assert_eq!(-a, CellPoint::new(-3, 2));
        assert_eq!(a * 2, CellPoint::new(6, -4));
    }

    #[test]
    fn manhattan_distance_handles_signs() {
        let a = CellPoint::new(-3, 4);
        let b = CellPoint::new(2, -1);
        assert_eq!(a.manhattan_distance(b), 10);
        assert_eq!(b.manhattan_distance(a), 10);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn adjacency_is_four_connected() {
        let c = CellPoint::new(0, 0);
        assert!(c.is_adjacent(CellPoint::new(1, 0)));
        assert!(c.is_adjacent(CellPoint::new(0, -1)));
        assert!(!c.is_adjacent(CellPoint::new(1, 1)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn shares_axis_excludes_self_and_diagonal() {
        let c = CellPoint::new(2, 2);
        assert!(c.shares_axis(CellPoint::new(2, 7)));
        assert!(c.shares_axis(CellPoint::new(-4, 2)));
        assert!(!c.shares_axis(c));
        assert!(!c.shares_axis(CellPoint::new(3, 3)));
    }
}
