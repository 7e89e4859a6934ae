//! Gridstead: the grid placement core of a colony simulation.
//!
//! This is the top-level facade crate re-exporting the public API from
//! all gridstead sub-crates. For most users, adding `gridstead` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gridstead::prelude::*;
//!
//! // A world with a 64x64 building index and one 16x16 placeable area.
//! let world = World::new(WorldConfig {
//!     index: IndexConfig::new((64, 64), (4, 4), (16, 16)).unwrap(),
//!     ..WorldConfig::default()
//! });
//! world
//!     .register_area(GridArea::new(CellRect::new(
//!         CellPoint::new(0, 0),
//!         CellPoint::new(16, 16),
//!     )))
//!     .unwrap();
//!
//! // Lay a road and place a house next to it.
//! world.register_path(CellPoint::new(0, 8), CellPoint::new(7, 8)).unwrap();
//! world
//!     .place_building(
//!         &CellRect::new(CellPoint::new(2, 2), CellPoint::new(4, 4)),
//!         BuildingId(1),
//!     )
//!     .unwrap();
//! world.wait_until_idle();
//!
//! assert!(world.is_road(CellPoint::new(3, 8)));
//! let graph = world.paths().graph(PathGraphKind::Road);
//! assert!(graph.are_connected(CellPoint::new(0, 8), CellPoint::new(7, 8)));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridstead-core` | Cell coordinates, rectangles, directions, IDs |
//! | [`grid`] | `gridstead-grid` | Occupancy layers, areas, the registry, terrain seam |
//! | [`index`] | `gridstead-index` | The lock-striped concurrent spatial index |
//! | [`path`] | `gridstead-path` | The path graph and placement analysis |
//! | [`nav`] | `gridstead-nav` | Grid-to-graph adapter and budgeted A* |
//! | [`world`] | `gridstead-world` | Per-world systems, pipelines, and placement flows |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cell coordinates, rectangles, compass directions, and typed IDs
/// (`gridstead-core`).
pub use gridstead_core as types;

/// Occupancy storage (`gridstead-grid`).
///
/// [`grid::GridLayer`] bit-packed layers, [`grid::GridArea`] regions with
/// terrain-derived obstacles, and the routing [`grid::GridRegistry`].
pub use gridstead_grid as grid;

/// The concurrent spatial index for building footprints
/// (`gridstead-index`).
pub use gridstead_index as index;

/// Path connectivity (`gridstead-path`).
///
/// [`path::PathGraph`] plus the placement analysis deriving
/// [`path::GraphDelta`]s from occupancy changes.
pub use gridstead_path as path;

/// Pathfinding over the grid (`gridstead-nav`).
///
/// The [`nav::NavGrid`] seam, [`nav::GridNavAdapter`], and
/// [`nav::find_path`] with [`nav::NavFilter`] tuning.
pub use gridstead_nav as nav;

/// Per-world orchestration (`gridstead-world`).
///
/// The [`world::World`] context object, the building and path systems
/// with their serialized pipelines, and [`world::PathPreview`].
pub use gridstead_world as world;

/// Common imports for typical gridstead usage.
///
/// ```rust
/// use gridstead::prelude::*;
/// ```
pub mod prelude {
    pub use gridstead_core::{AreaId, BuildingId, CellPoint, CellRect, GridDirection};

    pub use gridstead_grid::{
        GridArea, GridLayer, GridRegistry, GridTransform, LayerKind, ObstacleConfig,
        RegisterError, TerrainProbe,
    };

    pub use gridstead_index::{IndexConfig, IndexConfigError, SpatialIndex};

    pub use gridstead_path::{GraphDelta, PathGraph};

    pub use gridstead_nav::{find_path, GridNavAdapter, NavFilter, NavGrid};

    pub use gridstead_world::{
        PathError, PathGraphKind, PathPreview, PlacementError, World, WorldConfig,
    };
}
