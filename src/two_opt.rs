//! 2-opt local search.
//!
//! Reverses interior segments while that shortens the two edges around the
//! segment. The first and last stop never move, so the anchor and closing
//! legs are untouched by every move.

use crate::cost::CostModel;

/// Improvement threshold in kilometers; keeps float noise from cycling.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Runs full passes until one makes no improvement.
///
/// Returns the number of segment reversals applied. Running it again on its
/// own output applies none.
pub fn two_opt(order: &mut [usize], model: &CostModel, epsilon: f64) -> usize {
    let n = order.len();
    if n < 4 {
        return 0;
    }

    let mut reversals = 0;
    let mut improved = true;

    while improved {
        improved = false;
        for i in 1..n - 2 {
            for k in i + 1..n - 1 {
                let (a, b) = (order[i - 1], order[i]);
                let (c, d) = (order[k], order[k + 1]);

                let before = model.distance(a, b) + model.distance(c, d);
                let after = model.distance(a, c) + model.distance(b, d);

                if after + epsilon < before {
                    order[i..=k].reverse();
                    reversals += 1;
                    improved = true;
                }
            }
        }
    }

    tracing::trace!(n, reversals, "2-opt reached a local optimum");
    reversals
}
