//! Grid registry error types.

use std::error::Error;
use std::fmt;

use gridstead_core::{AreaId, CellRect};

/// Why an area registration was declined.
///
/// Degenerate bounds are not a decline: [`GridArea::new`](crate::GridArea::new)
/// asserts non-empty bounds at construction, so the registry only ever
/// sees areas with cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterError {
    /// The requested bounds share cells with an already registered area.
    Overlaps {
        /// The bounds that were requested.
        bounds: CellRect,
        /// The registered area they collide with.
        existing: AreaId,
    },
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterError::Overlaps { bounds, existing } => {
                write!(f, "area bounds {bounds} overlap registered area {existing}")
            }
        }
    }
}

impl Error for RegisterError {}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstead_core::CellPoint;

    #[test]
    fn display_names_the_colliding_area() {
        let err = RegisterError::Overlaps {
            bounds: CellRect::new(CellPoint::ZERO, CellPoint::new(2, 2)),
            existing: AreaId(7),
        };
        assert_eq!(
            err.to_string(),
            "area bounds [(0, 0), (2, 2)) overlap registered area 7"
        );
    }
}
