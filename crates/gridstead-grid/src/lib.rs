//! Occupancy grid storage for the gridstead placement framework.
//!
//! Three levels of structure, leaf-first:
//!
//! - [`GridLayer`]: one bit-packed boolean channel over a padded 2D cell
//!   space, with tile-decomposed range queries and updates.
//! - [`GridArea`]: a registered sub-region of the world owning one layer
//!   per [`LayerKind`], including the terrain-derived obstacle layer.
//! - [`GridRegistry`]: the per-world set of non-overlapping areas, routing
//!   global-coordinate queries to the owning area.
//!
//! World-space geometry enters through [`GridTransform`]; terrain enters
//! through the [`TerrainProbe`] trait implemented by the host engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod area;
pub mod error;
pub mod layer;
pub mod registry;
pub mod terrain;
pub mod transform;

pub use area::{GridArea, LayerKind};
pub use error::RegisterError;
pub use layer::GridLayer;
pub use registry::GridRegistry;
pub use terrain::{ObstacleConfig, TerrainProbe};
pub use transform::GridTransform;
