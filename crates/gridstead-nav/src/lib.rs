//! Cell-level pathfinding for the gridstead placement framework.
//!
//! The [`NavGrid`] trait is the seam between occupancy storage and the
//! search: [`GridNavAdapter`] implements it over the grid registry with
//! the placement rules (obstacles block, construction blocks unless it
//! carries a path), and [`find_path`] runs a budgeted A* over any
//! implementation. Search behaviour is tuned through [`NavFilter`],
//! including the axis-preference weights that shape interactive path
//! previews into predictable L-shapes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adapter;
pub mod filter;
pub mod search;

pub use adapter::{GridNavAdapter, NavGrid};
pub use filter::NavFilter;
pub use search::find_path;
