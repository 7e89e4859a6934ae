//! Incremental vertex analysis for path registration and removal.
//!
//! Everything here is a pure function over an `is_path` predicate, so the
//! caller decides what backs it (the road occupancy layer in production,
//! a plain set in tests) and at which point in a mutation sequence each
//! analysis runs. That timing is part of the contract:
//!
//! - [`registration_delta`] runs *after* the new rectangle is marked as
//!   path, and produces the complete delta for a registration.
//! - [`unregistration_border_delta`] runs *before* any cell is cleared;
//!   the caller then clears the rectangle, collects interior vertex
//!   removals on the way, and derives the replacement corridor edges from
//!   the post-clear predicate via [`connection_over_path_cell`] and
//!   [`vertex_connections`].

use gridstead_core::{CellPoint, CellRect, GridDirection};

use crate::graph::GraphDelta;

/// A connection request between two vertex coordinates.
pub type Connection = (CellPoint, CellPoint);

// N, E, S, W neighbour patterns of a straight-through corridor cell.
const STRAIGHT_ALONG_X: [bool; 4] = [true, false, true, false];
const STRAIGHT_ALONG_Y: [bool; 4] = [false, true, false, true];

fn neighbors_match(
    coords: CellPoint,
    pattern: [bool; 4],
    is_path: &impl Fn(CellPoint) -> bool,
) -> bool {
    GridDirection::ALL
        .iter()
        .all(|d| is_path(d.adjacent(coords)) == pattern[d.index()])
}

/// Whether a cell is a graph vertex: a path cell that is anything other
/// than a straight-through corridor cell. Endpoints, corners, junctions
/// and isolated cells all qualify.
pub fn should_be_vertex(coords: CellPoint, is_path: &impl Fn(CellPoint) -> bool) -> bool {
    if !is_path(coords) {
        return false;
    }
    !(neighbors_match(coords, STRAIGHT_ALONG_X, is_path)
        || neighbors_match(coords, STRAIGHT_ALONG_Y, is_path))
}

/// Every vertex cell inside `rect`, in X-major order.
pub fn vertices_in_rect(rect: &CellRect, is_path: &impl Fn(CellPoint) -> bool) -> Vec<CellPoint> {
    rect.cells()
        .filter(|&coords| should_be_vertex(coords, is_path))
        .collect()
}

/// Walk along `shift` from a path cell until a vertex is met.
///
/// Terminates because every straight run of path cells ends at a cell
/// whose pattern is not straight-through.
fn first_met_vertex(
    mut coords: CellPoint,
    shift: CellPoint,
    is_path: &impl Fn(CellPoint) -> bool,
) -> CellPoint {
    debug_assert!(is_path(coords));
    while !should_be_vertex(coords, is_path) {
        coords += shift;
        debug_assert!(is_path(coords), "walked off the path at {coords}");
    }
    coords
}

/// If a path continues from `vertex` in `direction`, record the edge to
/// the first vertex met along it.
fn vertex_connection(
    vertex: CellPoint,
    direction: GridDirection,
    is_path: &impl Fn(CellPoint) -> bool,
    out: &mut Vec<Connection>,
) {
    debug_assert!(is_path(vertex));
    let shift = direction.offset();
    let next = vertex + shift;
    if is_path(next) {
        out.push((vertex, first_met_vertex(next, shift, is_path)));
    }
}

/// Record the outgoing edges of each vertex in all four directions.
pub fn vertex_connections(
    vertices: &[CellPoint],
    is_path: &impl Fn(CellPoint) -> bool,
    out: &mut Vec<Connection>,
) {
    for &vertex in vertices {
        for direction in GridDirection::ALL {
            vertex_connection(vertex, direction, is_path, out);
        }
    }
}

/// Record the edge spanning a corridor cell that is not itself a vertex.
///
/// Walks from the cell in both `direction` and its opposite to the first
/// vertex on each side; records nothing when the corridor does not extend
/// both ways along that axis. Used when a vertex demotes to a corridor
/// cell and the edges it anchored must be replaced by one through edge.
pub fn connection_over_path_cell(
    coords: CellPoint,
    direction: GridDirection,
    is_path: &impl Fn(CellPoint) -> bool,
    out: &mut Vec<Connection>,
) {
    debug_assert!(is_path(coords) && !should_be_vertex(coords, is_path));
    let shift = direction.offset();
    if !is_path(coords + shift) || !is_path(coords - shift) {
        return;
    }
    let forth = first_met_vertex(coords + shift, shift, is_path);
    let back = first_met_vertex(coords - shift, -shift, is_path);
    out.push((forth, back));
}

/// The complete graph delta implied by registering `path_rect` as path.
///
/// `is_path` must already report the rectangle's cells as path. Gathers
/// the new vertices inside the rectangle with their edges, then walks the
/// one-cell border to promote, demote, or re-link the path cells the new
/// rectangle now touches.
pub fn registration_delta(
    path_rect: &CellRect,
    is_path: &impl Fn(CellPoint) -> bool,
) -> GraphDelta {
    let mut delta = GraphDelta {
        vertices_to_add: vertices_in_rect(path_rect, is_path),
        ..GraphDelta::default()
    };
    let new_vertices = delta.vertices_to_add.clone();
    vertex_connections(&new_vertices, is_path, &mut delta.connections_to_add);

    for direction in GridDirection::ALL {
        for coords in direction.adjacent_rect(path_rect).cells() {
            border_cell_after_registration(coords, direction, is_path, &mut delta);
        }
    }
    delta
}

/// Classify one border cell after a registration.
///
/// `towards_cell` is the direction from the new path rectangle to the
/// cell. The cell gained exactly one path neighbour (on its side facing
/// the rectangle), which can promote it to a vertex, demote it to a
/// corridor cell, or merely grow a new edge out of an existing vertex.
fn border_cell_after_registration(
    coords: CellPoint,
    towards_cell: GridDirection,
    is_path: &impl Fn(CellPoint) -> bool,
    delta: &mut GraphDelta,
) {
    if !is_path(coords) {
        return;
    }
    let towards_path = towards_cell.opposite();

    // Promoted: every other neighbour is path, so before the registration
    // the cell was a straight-through or T pattern missing this side.
    let mut promotion = [true; 4];
    promotion[towards_cell.index()] = false;

    // Demoted: the new neighbour completed a straight-through pattern.
    let mut demotion = [false; 4];
    demotion[towards_path.index()] = true;
    demotion[towards_cell.index()] = true;

    if neighbors_match(coords, promotion, is_path) {
        delta.vertices_to_add.push(coords);
        vertex_connection(coords, towards_path, is_path, &mut delta.connections_to_add);
        vertex_connection(
            coords,
            towards_path.clockwise(),
            is_path,
            &mut delta.connections_to_add,
        );
        vertex_connection(
            coords,
            towards_path.counter_clockwise(),
            is_path,
            &mut delta.connections_to_add,
        );
    } else if neighbors_match(coords, demotion, is_path) {
        delta.vertices_to_remove.push(coords);
        connection_over_path_cell(coords, towards_path, is_path, &mut delta.connections_to_add);
    } else {
        vertex_connection(coords, towards_path, is_path, &mut delta.connections_to_add);
    }
}

/// The border part of an unregistration delta, gathered while the
/// rectangle's cells still read as path.
///
/// Returns promotions and demotions of border cells plus the edges into
/// the rectangle that must be disconnected. The caller completes the
/// delta after clearing the rectangle: interior vertices join
/// `vertices_to_remove` during the clear, each border demotion gets a
/// replacement through edge from [`connection_over_path_cell`], and each
/// promotion gets its edges from [`vertex_connections`].
pub fn unregistration_border_delta(
    rect: &CellRect,
    is_path: &impl Fn(CellPoint) -> bool,
) -> GraphDelta {
    let mut delta = GraphDelta::default();
    for direction in GridDirection::ALL {
        let towards_path = direction.opposite();
        for coords in direction.adjacent_rect(rect).cells() {
            // Only border cells actually facing a path cell of the
            // rectangle are affected.
            if is_path(towards_path.adjacent(coords)) {
                border_cell_before_unregistration(coords, direction, is_path, &mut delta);
            }
        }
    }
    delta
}

/// Classify one border cell before an unregistration; mirror image of
/// [`border_cell_after_registration`].
fn border_cell_before_unregistration(
    coords: CellPoint,
    towards_cell: GridDirection,
    is_path: &impl Fn(CellPoint) -> bool,
    delta: &mut GraphDelta,
) {
    if !is_path(coords) {
        return;
    }
    let towards_path = towards_cell.opposite();

    // Promoted: currently straight-through along the axis into the
    // rectangle; losing that neighbour makes it an endpoint.
    let mut promotion = [false; 4];
    promotion[towards_path.index()] = true;
    promotion[towards_cell.index()] = true;

    // Demoted: currently a junction missing only its far side; losing
    // the rectangle neighbour leaves a straight-through pattern.
    let mut demotion = [true; 4];
    demotion[towards_cell.index()] = false;

    if neighbors_match(coords, promotion, is_path) {
        delta.vertices_to_add.push(coords);
    } else if neighbors_match(coords, demotion, is_path) {
        delta.vertices_to_remove.push(coords);
    } else {
        vertex_connection(coords, towards_path, is_path, &mut delta.connections_to_remove);
    }
}
