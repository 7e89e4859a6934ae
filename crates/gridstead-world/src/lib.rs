//! Per-world orchestration for the gridstead placement framework.
//!
//! A [`World`] is the context object one simulation world owns: the grid
//! registry behind a lock, the [`BuildingSystem`] over the concurrent
//! spatial index, and the [`PathSystem`] maintaining one graph per path
//! network. Mutations against each shared structure funnel through that
//! structure's [`TaskPipe`], a strictly FIFO single-consumer queue, so
//! independent callers never interleave mid-operation; synchronous reads
//! go straight to the structures under their own locks.
//!
//! The placement flows live on `World` itself: building placement and
//! demolition, path segment registration and removal, and the
//! [`PathPreview`] that turns an interactive route into committed
//! segments.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod building;
pub mod error;
pub mod paths;
pub mod pipe;
mod placement;
pub mod preview;
pub mod world;

pub use building::BuildingSystem;
pub use error::{PathError, PlacementError};
pub use paths::{PathGraphKind, PathSystem};
pub use pipe::TaskPipe;
pub use preview::PathPreview;
pub use world::{World, WorldConfig};
