//! The per-simulation-world context object.

use std::sync::RwLock;

use gridstead_core::{AreaId, CellPoint};
use gridstead_grid::{GridArea, GridRegistry, GridTransform, LayerKind, RegisterError};
use gridstead_index::IndexConfig;

use crate::building::BuildingSystem;
use crate::paths::PathSystem;

/// Construction parameters for a [`World`].
#[derive(Clone, Copy, Debug)]
pub struct WorldConfig {
    /// World-space geometry of one cell.
    pub transform: GridTransform,
    /// Geometry of the building spatial index.
    pub index: IndexConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            transform: GridTransform::default(),
            // 1024x1024 cells, 16x16 buckets, 64x64 lock cells.
            index: IndexConfig::new((1024, 1024), (16, 16), (64, 64))
                .expect("reference geometry satisfies the divisibility rules"),
        }
    }
}

/// Everything one simulation world owns: the area registry, the building
/// system, and the path system. There is no ambient global state; every
/// collaborator receives a `&World`.
///
/// The registry carries its own `RwLock` because it is mutated both by
/// synchronous registration flows and by placement orchestration, while
/// the building index and path graphs bring their own locking. Dropping
/// the world drains both systems' pipes before any storage is released.
pub struct World {
    transform: GridTransform,
    registry: RwLock<GridRegistry>,
    buildings: BuildingSystem,
    paths: PathSystem,
}

impl World {
    /// Create an empty world.
    pub fn new(config: WorldConfig) -> Self {
        Self {
            transform: config.transform,
            registry: RwLock::new(GridRegistry::new()),
            buildings: BuildingSystem::new(config.index),
            paths: PathSystem::new(),
        }
    }

    /// World-space to cell-space geometry.
    pub fn transform(&self) -> &GridTransform {
        &self.transform
    }

    /// The area registry.
    pub fn registry(&self) -> &RwLock<GridRegistry> {
        &self.registry
    }

    /// The building footprint system.
    pub fn buildings(&self) -> &BuildingSystem {
        &self.buildings
    }

    /// The path graph system.
    pub fn paths(&self) -> &PathSystem {
        &self.paths
    }

    /// Register a placeable area, claiming its bounds.
    pub fn register_area(&self, area: GridArea) -> Result<AreaId, RegisterError> {
        self.registry.write().unwrap().register(area)
    }

    /// Unregister an area, discarding its layers.
    pub fn unregister_area(&self, id: AreaId) -> Option<GridArea> {
        self.registry.write().unwrap().unregister(id)
    }

    /// Whether a cell currently carries road.
    pub fn is_road(&self, coords: CellPoint) -> bool {
        self.registry.read().unwrap().cell(LayerKind::Road, coords)
    }

    /// Block until every pipelined mutation submitted so far has been
    /// applied to the building index and the path graphs.
    pub fn wait_until_idle(&self) {
        self.buildings.wait_until_idle();
        self.paths.wait_until_idle();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}
