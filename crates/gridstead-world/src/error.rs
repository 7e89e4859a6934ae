//! Declined-operation diagnostics for placement flows.

use std::error::Error;
use std::fmt;

use gridstead_core::{CellPoint, CellRect};

/// Why a building placement was declined. World state is unchanged in
/// every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// The footprint does not lie wholly inside one registered area.
    CrossesAreaBoundary {
        /// The requested footprint.
        footprint: CellRect,
    },
    /// A cell of the footprint carries an obstacle or construction, or is
    /// not covered by any area.
    Obstructed {
        /// The requested footprint.
        footprint: CellRect,
    },
    /// Another building already holds an overlapping footprint in the
    /// spatial index.
    FootprintTaken {
        /// The requested footprint.
        footprint: CellRect,
    },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::CrossesAreaBoundary { footprint } => {
                write!(f, "footprint {footprint} crosses an area boundary")
            }
            PlacementError::Obstructed { footprint } => {
                write!(f, "footprint {footprint} is obstructed")
            }
            PlacementError::FootprintTaken { footprint } => {
                write!(f, "footprint {footprint} overlaps a registered building")
            }
        }
    }
}

impl Error for PlacementError {}

/// Why a path registration was declined. World state is unchanged in
/// every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathError {
    /// The segment endpoints do not share an axis.
    NotAxisAligned {
        /// Requested segment start.
        from: CellPoint,
        /// Requested segment end.
        to: CellPoint,
    },
    /// The segment does not lie wholly inside one registered area.
    CrossesAreaBoundary {
        /// The segment's covering rectangle.
        rect: CellRect,
    },
    /// A cell of the segment is blocked by an obstacle or a building.
    Obstructed {
        /// The segment's covering rectangle.
        rect: CellRect,
        /// The first blocked cell found.
        at: CellPoint,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::NotAxisAligned { from, to } => {
                write!(f, "path segment {from} to {to} is not axis aligned")
            }
            PathError::CrossesAreaBoundary { rect } => {
                write!(f, "path segment {rect} crosses an area boundary")
            }
            PathError::Obstructed { rect, at } => {
                write!(f, "path segment {rect} is blocked at {at}")
            }
        }
    }
}

impl Error for PathError {}
