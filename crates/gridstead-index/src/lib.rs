//! Concurrent spatial indexing for the gridstead placement framework.
//!
//! A [`SpatialIndex`] answers "what occupies this rectangle" and "claim
//! this rectangle if free" from many threads at once. Space is divided
//! twice: fine *buckets* hold entry lists for fast queries, and coarser
//! *lock cells* stripe those buckets under independent `RwLock`s so that
//! operations on distant rectangles never contend.
//!
//! Geometry is validated up front by [`IndexConfig`]; the divisibility
//! rules it enforces are what let each lock cell own its buckets outright.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod index;

pub use config::{IndexConfig, IndexConfigError};
pub use index::SpatialIndex;
