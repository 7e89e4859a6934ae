//! Budgeted A* over a [`NavGrid`].

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use gridstead_core::CellPoint;

use crate::adapter::NavGrid;
use crate::filter::NavFilter;

struct NodeState {
    g: f64,
    parent: Option<CellPoint>,
    closed: bool,
}

/// Find a cell path from `start` to `end`, inclusive of both.
///
/// Unit step cost per cell; the heuristic and node budget come from
/// `filter`. Returns an empty vector when either endpoint is not
/// traversable, when no route exists, or when the budget runs out before
/// the goal is reached; there are no partial results. `start == end`
/// returns the single-cell path when the cell is traversable.
///
/// Ties in the open set break on cell coordinates, so the result is
/// deterministic for a given grid state.
pub fn find_path<G: NavGrid>(
    grid: &G,
    start: CellPoint,
    end: CellPoint,
    filter: &NavFilter,
) -> Vec<CellPoint> {
    if !grid.is_traversable(start) || !grid.is_traversable(end) {
        return Vec::new();
    }
    if start == end {
        return vec![start];
    }

    let budget = filter.max_search_nodes as usize;
    let mut nodes: HashMap<CellPoint, NodeState> = HashMap::new();
    // Min-heap over (f_bits, cell). All f values are non-negative, and
    // IEEE 754 bit patterns of non-negative floats order like the floats
    // themselves, so u64 keys give a total order without a float wrapper.
    let mut open: BinaryHeap<Reverse<(u64, CellPoint)>> = BinaryHeap::new();

    nodes.insert(
        start,
        NodeState {
            g: 0.0,
            parent: None,
            closed: false,
        },
    );
    let f_start = filter.heuristic_scale * filter.heuristic(start, end);
    open.push(Reverse((f_start.to_bits(), start)));

    let mut reached = false;
    while let Some(Reverse((_, current))) = open.pop() {
        let Some(state) = nodes.get_mut(&current) else {
            continue;
        };
        if state.closed {
            continue;
        }
        state.closed = true;
        let current_g = state.g;
        if current == end {
            reached = true;
            break;
        }

        for next in grid.neighbours(current) {
            let tentative_g = current_g + 1.0;
            match nodes.get_mut(&next) {
                Some(next_state) => {
                    if next_state.closed || next_state.g <= tentative_g {
                        continue;
                    }
                    next_state.g = tentative_g;
                    next_state.parent = Some(current);
                }
                None => {
                    if nodes.len() >= budget {
                        continue;
                    }
                    nodes.insert(
                        next,
                        NodeState {
                            g: tentative_g,
                            parent: Some(current),
                            closed: false,
                        },
                    );
                }
            }
            let f = tentative_g + filter.heuristic_scale * filter.heuristic(next, end);
            open.push(Reverse((f.to_bits(), next)));
        }
    }

    if !reached {
        return Vec::new();
    }
    let mut path = Vec::new();
    let mut cursor = Some(end);
    while let Some(coords) = cursor {
        path.push(coords);
        cursor = nodes[&coords].parent;
    }
    path.reverse();
    path
}
