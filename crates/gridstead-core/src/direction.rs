//! Compass directions over the cell grid.

use std::fmt;

use crate::point::CellPoint;
use crate::rect::CellRect;

/// One of the four axis-aligned grid directions.
///
/// The coordinate convention follows the placement core throughout:
/// North is `+X`, East is `+Y`. The discriminant order `N, E, S, W`
/// doubles as the fixed neighbour-visit order for deterministic
/// tie-breaking in graph searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GridDirection {
    /// Towards `+X`.
    North = 0,
    /// Towards `+Y`.
    East = 1,
    /// Towards `-X`.
    South = 2,
    /// Towards `-Y`.
    West = 3,
}

impl GridDirection {
    /// Number of grid directions.
    pub const COUNT: usize = 4;

    /// All directions in the canonical `N, E, S, W` order.
    pub const ALL: [GridDirection; 4] = [
        GridDirection::North,
        GridDirection::East,
        GridDirection::South,
        GridDirection::West,
    ];

    const OFFSETS: [CellPoint; 4] = [
        CellPoint::new(1, 0),
        CellPoint::new(0, 1),
        CellPoint::new(-1, 0),
        CellPoint::new(0, -1),
    ];

    /// The unit cell offset for this direction.
    pub fn offset(self) -> CellPoint {
        Self::OFFSETS[self as usize]
    }

    /// The cell adjacent to `coords` in this direction.
    pub fn adjacent(self, coords: CellPoint) -> CellPoint {
        coords + self.offset()
    }

    /// The opposite direction.
    pub fn opposite(self) -> GridDirection {
        Self::ALL[(self as usize + 2) % Self::COUNT]
    }

    /// The next direction clockwise.
    pub fn clockwise(self) -> GridDirection {
        Self::ALL[(self as usize + 1) % Self::COUNT]
    }

    /// The next direction counter-clockwise.
    pub fn counter_clockwise(self) -> GridDirection {
        Self::ALL[(self as usize + 3) % Self::COUNT]
    }

    /// The discriminant as an array index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction from `from` towards `to`, if they share exactly one axis.
    ///
    /// Returns `None` for identical or diagonal coordinate pairs. The
    /// points need not be adjacent; only the axis and sign matter.
    pub fn between(from: CellPoint, to: CellPoint) -> Option<GridDirection> {
        if from.x == to.x {
            if from.y == to.y {
                None
            } else if from.y < to.y {
                Some(GridDirection::East)
            } else {
                Some(GridDirection::West)
            }
        } else if from.y != to.y {
            None
        } else if from.x < to.x {
            Some(GridDirection::North)
        } else {
            Some(GridDirection::South)
        }
    }

    /// The rectangle of cells immediately adjacent to `rect` on this side.
    ///
    /// The result is one cell thick and exactly as long as the facing
    /// edge of `rect`.
    pub fn adjacent_rect(self, rect: &CellRect) -> CellRect {
        let w = rect.width() as i32;
        let h = rect.height() as i32;
        match self {
            GridDirection::North => CellRect::new(
                rect.min + CellPoint::new(w, 0),
                rect.max + CellPoint::new(1, 0),
            ),
            GridDirection::East => CellRect::new(
                rect.min + CellPoint::new(0, h),
                rect.max + CellPoint::new(0, 1),
            ),
            GridDirection::South => CellRect::new(
                rect.min - CellPoint::new(1, 0),
                rect.max - CellPoint::new(w, 0),
            ),
            GridDirection::West => CellRect::new(
                rect.min - CellPoint::new(0, 1),
                rect.max - CellPoint::new(0, h),
            ),
        }
    }
}

impl fmt::Display for GridDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GridDirection::North => "north",
            GridDirection::East => "east",
            GridDirection::South => "south",
            GridDirection::West => "west",
        };
        f.write_str(name)
    }
}
