//! Multi-start local search.
//!
//! Shuffles the stops into a random order, polishes it with 2-opt, and keeps
//! the shortest result. Trials are independent: nothing is recombined or
//! mutated between them.

use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::solver::CancelFlag;
use crate::two_opt::two_opt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestartOptions {
    /// Random restarts on top of the baseline.
    pub trials: usize,
    /// Polish trials on the rayon pool. Off by default so a solve stays on
    /// the calling thread; the outcome does not depend on it.
    pub parallel: bool,
}

impl Default for RestartOptions {
    fn default() -> Self {
        Self {
            trials: 40,
            parallel: false,
        }
    }
}

/// Best of `baseline` and `options.trials` shuffled, 2-opt polished orders.
///
/// `baseline` should already be 2-opt polished; it wins every tie. Among
/// trials, the earliest one with a strictly lower cost wins, so the result
/// depends only on the rng, not on scheduling.
pub fn restart<R: Rng + ?Sized>(
    baseline: Vec<usize>,
    model: &CostModel,
    options: &RestartOptions,
    epsilon: f64,
    rng: &mut R,
    cancel: Option<&CancelFlag>,
) -> (Vec<usize>, f64) {
    let best_cost = model.cost(&baseline);
    let n = model.len();

    // Draw every shuffle up front so the rng sequence is fixed.
    let starts: Vec<Vec<usize>> = (0..options.trials)
        .map(|_| {
            let mut order: Vec<usize> = (0..n).collect();
            order.shuffle(&mut *rng);
            order
        })
        .collect();

    let polish = |(trial, mut order): (usize, Vec<usize>)| {
        if cancel.is_some_and(CancelFlag::is_cancelled) {
            return None;
        }
        two_opt(&mut order, model, epsilon);
        let cost = model.cost(&order);
        tracing::trace!(trial, cost, "restart trial polished");
        Some((order, cost))
    };

    let polished: Vec<Option<(Vec<usize>, f64)>> = if options.parallel {
        starts.into_par_iter().enumerate().map(polish).collect()
    } else {
        starts.into_iter().enumerate().map(polish).collect()
    };

    if cancel.is_some_and(CancelFlag::is_cancelled) {
        tracing::warn!("restart cancelled, returning best of completed trials");
    }

    polished
        .into_iter()
        .flatten()
        .fold((baseline, best_cost), |best, candidate| {
            if candidate.1 < best.1 { candidate } else { best }
        })
}
