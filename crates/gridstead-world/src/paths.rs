//! The per-world path graphs and their mutation pipes.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use gridstead_grid::LayerKind;
use gridstead_path::{GraphDelta, PathGraph};

use crate::pipe::TaskPipe;

/// The path networks a world maintains, one graph each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathGraphKind {
    /// Player-laid roads.
    Road,
}

impl PathGraphKind {
    /// Every kind, in shard order.
    pub const ALL: [PathGraphKind; 1] = [PathGraphKind::Road];

    /// The occupancy layer cells of this network live on.
    pub fn layer(self) -> LayerKind {
        match self {
            PathGraphKind::Road => LayerKind::Road,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

struct GraphShard {
    graph: Arc<RwLock<PathGraph>>,
    pipe: TaskPipe,
}

/// One [`PathGraph`] per [`PathGraphKind`], each paired with its own
/// serialized mutation pipe.
///
/// Writes go through [`update_graph_async`](Self::update_graph_async):
/// deltas apply in submission order on the shard's pipe worker, each as
/// one batch under the graph's write lock, so synchronous readers under
/// [`graph`](Self::graph) never observe a half-applied delta.
pub struct PathSystem {
    shards: Vec<GraphShard>,
}

impl Default for PathSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSystem {
    /// Create empty graphs for every kind.
    pub fn new() -> Self {
        Self {
            shards: PathGraphKind::ALL
                .iter()
                .map(|_| GraphShard {
                    graph: Arc::new(RwLock::new(PathGraph::new())),
                    pipe: TaskPipe::new(),
                })
                .collect(),
        }
    }

    /// Read access to a graph; holds off pending delta application for
    /// the guard's lifetime.
    pub fn graph(&self, kind: PathGraphKind) -> RwLockReadGuard<'_, PathGraph> {
        self.shards[kind.index()].graph.read().unwrap()
    }

    /// Enqueue a delta; it applies atomically after everything already
    /// submitted for this kind.
    pub fn update_graph_async(&self, kind: PathGraphKind, delta: GraphDelta) {
        let shard = &self.shards[kind.index()];
        let graph = Arc::clone(&shard.graph);
        shard.pipe.submit(move || {
            graph.write().unwrap().apply(&delta);
        });
    }

    /// Block until every delta submitted so far has been applied.
    pub fn wait_until_idle(&self) {
        for shard in &self.shards {
            shard.pipe.wait_until_empty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstead_core::CellPoint;

    fn p(x: i32, y: i32) -> CellPoint {
        CellPoint::new(x, y)
    }

    #[test]
    fn deltas_apply_in_submission_order() {
        let system = PathSystem::new();
        system.update_graph_async(
            PathGraphKind::Road,
            GraphDelta {
                vertices_to_add: vec![p(0, 0), p(5, 0)],
                connections_to_add: vec![(p(0, 0), p(5, 0))],
                ..GraphDelta::default()
            },
        );
        system.update_graph_async(
            PathGraphKind::Road,
            GraphDelta {
                vertices_to_remove: vec![p(5, 0)],
                ..GraphDelta::default()
            },
        );
        system.wait_until_idle();

        let graph = system.graph(PathGraphKind::Road);
        assert_eq!(graph.len(), 1);
        assert!(graph.is_vertex(p(0, 0)));
        assert!(!graph.is_vertex(p(5, 0)));
    }

    #[test]
    fn readers_never_see_a_half_applied_delta() {
        // A delta that adds a pair and its edge: any consistent snapshot
        // has either neither vertex or both plus the edge.
        let system = PathSystem::new();
        for round in 0..50 {
            let a = p(round, 0);
            let b = p(round, 3);
            system.update_graph_async(
                PathGraphKind::Road,
                GraphDelta {
                    vertices_to_add: vec![a, b],
                    connections_to_add: vec![(a, b)],
                    ..GraphDelta::default()
                },
            );
            let graph = system.graph(PathGraphKind::Road);
            if graph.is_vertex(a) {
                assert!(graph.is_vertex(b) && graph.are_connected(a, b));
            }
        }
        system.wait_until_idle();
        assert_eq!(system.graph(PathGraphKind::Road).len(), 100);
    }
}
