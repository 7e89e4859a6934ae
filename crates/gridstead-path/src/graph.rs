//! The path connectivity graph.

use std::collections::HashMap;

use gridstead_core::{CellPoint, GridDirection};

/// One graph vertex: up to four axis-aligned connections, slotted by the
/// direction they leave in.
#[derive(Clone, Copy, Debug, Default)]
struct Vertex {
    adjacent: [Option<usize>; GridDirection::COUNT],
}

/// A sparse graph over path vertices.
///
/// Vertices are keyed by cell coordinates and stored densely; removal
/// swap-fills from the back, patching the moved vertex's coordinate
/// mapping and its neighbours' back-references so indices stay compact.
/// Each vertex holds at most one connection per direction; connecting a
/// pair evicts whatever previously occupied the facing slots on both
/// ends, which is exactly right when a new junction splits an existing
/// corridor edge.
///
/// All mutating operations tolerate redundant input (adding an existing
/// vertex, disconnecting an absent edge) by doing nothing, so deltas
/// computed from slightly stale occupancy never corrupt the graph.
#[derive(Default)]
pub struct PathGraph {
    coords_to_index: HashMap<CellPoint, usize>,
    index_to_coords: Vec<CellPoint>,
    vertices: Vec<Vertex>,
}

impl PathGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether a vertex exists at `coords`.
    pub fn is_vertex(&self, coords: CellPoint) -> bool {
        self.coords_to_index.contains_key(&coords)
    }

    /// All vertex coordinates, in unspecified order.
    pub fn vertices(&self) -> impl Iterator<Item = CellPoint> + '_ {
        self.index_to_coords.iter().copied()
    }

    /// The vertex connected to `coords` in `direction`, if any.
    pub fn neighbor(&self, coords: CellPoint, direction: GridDirection) -> Option<CellPoint> {
        let index = *self.coords_to_index.get(&coords)?;
        let neighbor = self.vertices[index].adjacent[direction.index()]?;
        Some(self.index_to_coords[neighbor])
    }

    /// Whether an edge connects the two vertices.
    pub fn are_connected(&self, first: CellPoint, second: CellPoint) -> bool {
        let Some((first_index, second_index, direction)) = self.edge_slots(first, second) else {
            return false;
        };
        self.vertices[first_index].adjacent[direction.index()] == Some(second_index)
    }

    /// Add a vertex at `coords`; no-op if one exists.
    pub fn add_vertex(&mut self, coords: CellPoint) {
        if self.is_vertex(coords) {
            return;
        }
        self.coords_to_index.insert(coords, self.vertices.len());
        self.index_to_coords.push(coords);
        self.vertices.push(Vertex::default());
    }

    /// Remove the vertex at `coords` and its edges; no-op if absent.
    pub fn remove_vertex(&mut self, coords: CellPoint) {
        let Some(removed) = self.coords_to_index.remove(&coords) else {
            return;
        };
        // Unlink the neighbours' back-references before the slot is reused.
        self.repoint_neighbors(removed, None);
        self.vertices.swap_remove(removed);
        self.index_to_coords.swap_remove(removed);
        if removed < self.vertices.len() {
            // The former last vertex now lives at `removed`; patch its
            // coordinate mapping and its neighbours' back-references.
            let moved_coords = self.index_to_coords[removed];
            self.coords_to_index.insert(moved_coords, removed);
            self.repoint_neighbors(removed, Some(removed));
        }
    }

    /// Connect two vertices sharing an axis.
    ///
    /// Evicts any previous occupant of the facing slot on either end.
    /// No-op when the pair is diagonal, identical, or not both vertices.
    pub fn connect(&mut self, first: CellPoint, second: CellPoint) {
        let Some((first_index, second_index, direction)) = self.edge_slots(first, second) else {
            return;
        };
        let towards_second = direction.index();
        let towards_first = direction.opposite().index();
        if let Some(evicted) = self.vertices[first_index].adjacent[towards_second] {
            self.vertices[evicted].adjacent[towards_first] = None;
        }
        if let Some(evicted) = self.vertices[second_index].adjacent[towards_first] {
            self.vertices[evicted].adjacent[towards_second] = None;
        }
        self.vertices[first_index].adjacent[towards_second] = Some(second_index);
        self.vertices[second_index].adjacent[towards_first] = Some(first_index);
    }

    /// Remove the edge between two vertices, if exactly that edge exists.
    pub fn disconnect(&mut self, first: CellPoint, second: CellPoint) {
        let Some((first_index, second_index, direction)) = self.edge_slots(first, second) else {
            return;
        };
        let towards_second = direction.index();
        if self.vertices[first_index].adjacent[towards_second] != Some(second_index) {
            return;
        }
        self.vertices[first_index].adjacent[towards_second] = None;
        self.vertices[second_index].adjacent[direction.opposite().index()] = None;
    }

    /// Apply a gathered delta in the canonical order: disconnects, then
    /// vertex removals, then vertex additions, then connects.
    ///
    /// The order matters: removals drop stale edges before additions can
    /// be linked, and connects run last so they can evict corridor edges
    /// that new junction vertices split.
    pub fn apply(&mut self, delta: &GraphDelta) {
        for (a, b) in &delta.connections_to_remove {
            self.disconnect(*a, *b);
        }
        for coords in &delta.vertices_to_remove {
            self.remove_vertex(*coords);
        }
        for coords in &delta.vertices_to_add {
            self.add_vertex(*coords);
        }
        for (a, b) in &delta.connections_to_add {
            self.connect(*a, *b);
        }
    }

    /// Resolve an edge request to vertex indices and the first-to-second
    /// direction; `None` when the pair cannot carry an edge.
    fn edge_slots(
        &self,
        first: CellPoint,
        second: CellPoint,
    ) -> Option<(usize, usize, GridDirection)> {
        let direction = GridDirection::between(first, second)?;
        let first_index = *self.coords_to_index.get(&first)?;
        let second_index = *self.coords_to_index.get(&second)?;
        Some((first_index, second_index, direction))
    }

    /// Point every neighbour's back-reference slot for vertex `index` at
    /// `target`.
    fn repoint_neighbors(&mut self, index: usize, target: Option<usize>) {
        for direction in GridDirection::ALL {
            if let Some(neighbor) = self.vertices[index].adjacent[direction.index()] {
                self.vertices[neighbor].adjacent[direction.opposite().index()] = target;
            }
        }
    }
}

/// A batch of graph edits gathered by placement analysis, applied
/// atomically by [`PathGraph::apply`] in a fixed order.
#[derive(Clone, Debug, Default)]
pub struct GraphDelta {
    /// Edges to remove, first.
    pub connections_to_remove: Vec<(CellPoint, CellPoint)>,
    /// Vertices to remove, second.
    pub vertices_to_remove: Vec<CellPoint>,
    /// Vertices to add, third.
    pub vertices_to_add: Vec<CellPoint>,
    /// Edges to add, last.
    pub connections_to_add: Vec<(CellPoint, CellPoint)>,
}

impl GraphDelta {
    /// Whether the delta edits nothing.
    pub fn is_empty(&self) -> bool {
        self.connections_to_remove.is_empty()
            && self.vertices_to_remove.is_empty()
            && self.vertices_to_add.is_empty()
            && self.connections_to_add.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> CellPoint {
        CellPoint::new(x, y)
    }

    fn graph_of(vertices: &[(i32, i32)]) -> PathGraph {
        let mut graph = PathGraph::new();
        for &(x, y) in vertices {
            graph.add_vertex(p(x, y));
        }
        graph
    }

    // ── vertices ─────────────────────────────────────────────────────────

    #[test]
    fn add_is_idempotent() {
        let mut graph = graph_of(&[(0, 0)]);
        graph.add_vertex(p(0, 0));
        assert_eq!(graph.len(), 1);
        assert!(graph.is_vertex(p(0, 0)));
    }

    #[test]
    fn remove_absent_vertex_is_a_no_op() {
        let mut graph = graph_of(&[(0, 0)]);
        graph.remove_vertex(p(5, 5));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn removing_a_vertex_drops_its_edges() {
        let mut graph = graph_of(&[(0, 0), (3, 0), (3, 4)]);
        graph.connect(p(0, 0), p(3, 0));
        graph.connect(p(3, 0), p(3, 4));
        graph.remove_vertex(p(3, 0));
        assert!(!graph.is_vertex(p(3, 0)));
        assert_eq!(graph.neighbor(p(0, 0), GridDirection::North), None);
        assert_eq!(graph.neighbor(p(3, 4), GridDirection::West), None);
    }

    // ── swap-fill index patching ─────────────────────────────────────────

    #[test]
    fn swap_fill_preserves_edges_of_the_moved_vertex() {
        // A straight chain; removing the first-inserted vertex forces the
        // last-inserted one into its slot.
        let mut graph = graph_of(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        for x in 0..4 {
            graph.connect(p(x, 0), p(x + 1, 0));
        }
        graph.remove_vertex(p(0, 0));
        // (4,0) moved into index 0; its edge to (3,0) must survive.
        assert!(graph.are_connected(p(4, 0), p(3, 0)));
        assert!(graph.are_connected(p(3, 0), p(4, 0)));
        assert_eq!(graph.neighbor(p(4, 0), GridDirection::South), Some(p(3, 0)));
        assert_eq!(graph.neighbor(p(3, 0), GridDirection::North), Some(p(4, 0)));
        assert!(!graph.are_connected(p(1, 0), p(0, 0)));
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn removing_the_last_slot_needs_no_patch() {
        let mut graph = graph_of(&[(0, 0), (1, 0)]);
        graph.connect(p(0, 0), p(1, 0));
        // (1,0) occupies the last slot.
        graph.remove_vertex(p(1, 0));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.neighbor(p(0, 0), GridDirection::North), None);
    }

    #[test]
    fn repeated_removal_keeps_mappings_consistent() {
        let coords: Vec<_> = (0..6).map(|x| (x, 0)).collect();
        let mut graph = graph_of(&coords);
        for x in 0..5 {
            graph.connect(p(x, 0), p(x + 1, 0));
        }
        for x in [2, 0, 4] {
            graph.remove_vertex(p(x, 0));
        }
        for x in [1, 3, 5] {
            assert!(graph.is_vertex(p(x, 0)), "x={x}");
        }
        assert_eq!(graph.len(), 3);
        // Every surviving vertex lost its partners along the way.
        assert!(!graph.are_connected(p(3, 0), p(5, 0)));
        for x in [1, 3, 5] {
            for direction in GridDirection::ALL {
                assert_eq!(graph.neighbor(p(x, 0), direction), None);
            }
        }
    }

    // ── edges ────────────────────────────────────────────────────────────

    #[test]
    fn connect_requires_shared_axis_and_both_vertices() {
        let mut graph = graph_of(&[(0, 0), (2, 2), (5, 0)]);
        graph.connect(p(0, 0), p(2, 2));
        assert!(!graph.are_connected(p(0, 0), p(2, 2)));
        graph.connect(p(0, 0), p(9, 0));
        assert_eq!(graph.neighbor(p(0, 0), GridDirection::North), None);
        graph.connect(p(0, 0), p(5, 0));
        assert!(graph.are_connected(p(0, 0), p(5, 0)));
    }

    #[test]
    fn connect_evicts_previous_slot_occupants() {
        // 0-8 connected, then a junction at 4 splits the edge.
        let mut graph = graph_of(&[(0, 0), (8, 0), (4, 0)]);
        graph.connect(p(0, 0), p(8, 0));
        graph.connect(p(0, 0), p(4, 0));
        graph.connect(p(4, 0), p(8, 0));
        assert!(graph.are_connected(p(0, 0), p(4, 0)));
        assert!(graph.are_connected(p(4, 0), p(8, 0)));
        assert!(!graph.are_connected(p(0, 0), p(8, 0)));
        // 8's west slot points at 4, not at the evicted 0.
        assert_eq!(graph.neighbor(p(8, 0), GridDirection::South), Some(p(4, 0)));
    }

    #[test]
    fn disconnect_only_removes_the_exact_edge() {
        let mut graph = graph_of(&[(0, 0), (4, 0), (8, 0)]);
        graph.connect(p(0, 0), p(4, 0));
        graph.connect(p(4, 0), p(8, 0));
        // Not an existing edge; both real edges survive.
        graph.disconnect(p(0, 0), p(8, 0));
        assert!(graph.are_connected(p(0, 0), p(4, 0)));
        assert!(graph.are_connected(p(4, 0), p(8, 0)));

        graph.disconnect(p(0, 0), p(4, 0));
        assert!(!graph.are_connected(p(0, 0), p(4, 0)));
        assert!(graph.are_connected(p(4, 0), p(8, 0)));
    }

    // ── delta application ────────────────────────────────────────────────

    #[test]
    fn apply_runs_in_canonical_order() {
        let mut graph = graph_of(&[(0, 0), (6, 0)]);
        graph.connect(p(0, 0), p(6, 0));

        // A junction appears at (3,0): the old edge is split.
        let delta = GraphDelta {
            connections_to_remove: vec![(p(0, 0), p(6, 0))],
            vertices_to_remove: vec![],
            vertices_to_add: vec![p(3, 0)],
            connections_to_add: vec![(p(0, 0), p(3, 0)), (p(3, 0), p(6, 0))],
        };
        graph.apply(&delta);

        assert!(graph.are_connected(p(0, 0), p(3, 0)));
        assert!(graph.are_connected(p(3, 0), p(6, 0)));
        assert!(!graph.are_connected(p(0, 0), p(6, 0)));
    }

    #[test]
    fn empty_delta_is_empty() {
        assert!(GraphDelta::default().is_empty());
        let delta = GraphDelta {
            vertices_to_add: vec![p(0, 0)],
            ..GraphDelta::default()
        };
        assert!(!delta.is_empty());
    }
}
