//! Path connectivity for the gridstead placement framework.
//!
//! Registered paths induce a sparse graph: a *vertex* is any path cell
//! that is not a straight-through corridor cell (endpoints, corners,
//! junctions), and edges connect consecutive vertices along straight
//! corridor runs. [`PathGraph`] stores that graph; the [`placement`]
//! functions derive the [`GraphDelta`] a path registration or removal
//! implies by inspecting only the changed rectangle and its one-cell
//! border.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod graph;
pub mod placement;

pub use graph::{GraphDelta, PathGraph};
