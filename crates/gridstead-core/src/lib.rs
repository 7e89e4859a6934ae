//! Core types for the gridstead placement framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the gridstead workspace:
//! cell coordinates, half-open cell rectangles, compass directions, and
//! strongly-typed identifiers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod id;
pub mod point;
pub mod rect;

pub use direction::GridDirection;
pub use id::{AreaId, BuildingId};
pub use point::CellPoint;
pub use rect::CellRect;
