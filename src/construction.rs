//! Nearest-neighbour tour construction.
//!
//! Greedy: from the current stop, always walk to the closest stop not yet
//! visited. Scans run in ascending index order with strict comparisons, so
//! ties go to the lowest index.

use crate::cost::CostModel;
use crate::error::{Error, Result};

/// Nearest-neighbour order starting at `start`.
pub fn nearest_neighbor(model: &CostModel, start: usize) -> Result<Vec<usize>> {
    let n = model.len();
    if n == 0 {
        return Err(Error::invalid_input("nearest neighbour needs at least 1 point"));
    }
    if start >= n {
        return Err(Error::invalid_input(format!(
            "start index {} out of range for {} points",
            start, n
        )));
    }

    Ok(extend_greedily(model, start))
}

/// Nearest-neighbour order whose first stop is the point closest to the anchor.
///
/// The model must have been built for an anchored topology.
pub fn nearest_neighbor_from_anchor(model: &CostModel) -> Result<Vec<usize>> {
    let n = model.len();
    if n == 0 {
        return Err(Error::invalid_input("nearest neighbour needs at least 1 point"));
    }
    if model.anchor_distance(0).is_none() {
        return Err(Error::degenerate_input(
            "anchor start requested but the cost model has no anchor legs",
        ));
    }

    let mut first = 0;
    let mut best = f64::INFINITY;
    for index in 0..n {
        if let Some(d) = model.anchor_distance(index) {
            if d < best {
                best = d;
                first = index;
            }
        }
    }

    Ok(extend_greedily(model, first))
}

/// Starting order for the request's topology: from the anchor when anchored,
/// otherwise from `start`.
pub fn initial_tour(model: &CostModel, start: usize) -> Result<Vec<usize>> {
    if model.topology().anchored {
        nearest_neighbor_from_anchor(model)
    } else {
        nearest_neighbor(model, start)
    }
}

fn extend_greedily(model: &CostModel, first: usize) -> Vec<usize> {
    let n = model.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    visited[first] = true;
    order.push(first);

    while order.len() < n {
        let last = order[order.len() - 1];
        let mut pick = None;
        let mut pick_distance = f64::INFINITY;

        for candidate in (0..n).filter(|&j| !visited[j]) {
            let d = model.distance(last, candidate);
            if pick.is_none() || d < pick_distance {
                pick_distance = d;
                pick = Some(candidate);
            }
        }

        // At least one unvisited index remains while order.len() < n.
        let Some(next) = pick else { break };
        visited[next] = true;
        order.push(next);
    }

    order
}
