//! Route optimizer entry point.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::annealing::{AnnealingOptions, anneal};
use crate::construction::initial_tour;
use crate::cost::CostModel;
use crate::error::{Error, Result, ensure_finite};
use crate::haversine::Haversine;
use crate::model::{OptimizationRequest, OptimizationResult, Tour};
use crate::restart::{RestartOptions, restart};
use crate::traits::DistanceMetric;
use crate::two_opt::{DEFAULT_EPSILON, two_opt};

/// How to order the stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Greedy nearest neighbour only.
    NearestNeighbor,
    /// Nearest neighbour polished by 2-opt.
    TwoOpt,
    /// Nearest neighbour, 2-opt, then simulated annealing.
    Annealing,
    /// 2-opt baseline plus randomly restarted 2-opt trials.
    Restart,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::NearestNeighbor,
        Strategy::TwoOpt,
        Strategy::Annealing,
        Strategy::Restart,
    ];

    /// Heading shown above an itinerary.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::NearestNeighbor => "Route (NN)",
            Strategy::TwoOpt => "Route (NN + 2-opt)",
            Strategy::Annealing => "Route (SA)",
            Strategy::Restart => "Route (multi-start 2-opt)",
        }
    }

    /// Whether the strategy draws from the rng.
    pub fn is_stochastic(&self) -> bool {
        matches!(self, Strategy::Annealing | Strategy::Restart)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::NearestNeighbor => "nearest_neighbor",
            Strategy::TwoOpt => "two_opt",
            Strategy::Annealing => "annealing",
            Strategy::Restart => "restart",
        };
        f.write_str(name)
    }
}

/// Shared stop signal, checked between annealing iterations and restart
/// trials. A cancelled solve still returns its best order so far.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// First stop for unanchored topologies.
    pub start_index: usize,
    /// Requests with fewer points are rejected. Below two points every
    /// strategy returns a trivial zero-length tour anyway.
    pub min_points: usize,
    /// 2-opt improvement threshold in kilometers.
    pub two_opt_epsilon: f64,
    pub annealing: AnnealingOptions,
    pub restart: RestartOptions,
    #[serde(skip)]
    pub cancel: Option<CancelFlag>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            start_index: 0,
            min_points: 0,
            two_opt_epsilon: DEFAULT_EPSILON,
            annealing: AnnealingOptions::default(),
            restart: RestartOptions::default(),
            cancel: None,
        }
    }
}

/// Orders the request's points with haversine distances.
pub fn solve<R: Rng + ?Sized>(
    request: &OptimizationRequest,
    strategy: Strategy,
    options: &SolveOptions,
    rng: &mut R,
) -> Result<OptimizationResult> {
    solve_with(request, strategy, options, &Haversine, rng)
}

/// Orders the request's points with a caller-supplied distance metric.
#[tracing::instrument(
    level = "debug",
    skip(request, options, metric, rng),
    fields(points = request.len(), topology = ?request.topology())
)]
pub fn solve_with<M, R>(
    request: &OptimizationRequest,
    strategy: Strategy,
    options: &SolveOptions,
    metric: &M,
    rng: &mut R,
) -> Result<OptimizationResult>
where
    M: DistanceMetric + ?Sized,
    R: Rng + ?Sized,
{
    let n = request.len();
    if n < options.min_points {
        return Err(Error::invalid_input(format!(
            "{} needs at least {} points, got {}",
            strategy, options.min_points, n
        )));
    }

    let model = CostModel::new(
        &request.locations(),
        request.anchor(),
        request.topology(),
        metric,
    )?;

    if n == 0 {
        return Ok(OptimizationResult {
            tour: Tour::default(),
            cost_km: 0.0,
        });
    }

    let cancel = options.cancel.as_ref();
    let mut order = initial_tour(&model, options.start_index)?;
    tracing::debug!(cost = model.cost(&order), "nearest neighbour start");

    let cost = match strategy {
        Strategy::NearestNeighbor => model.cost(&order),
        Strategy::TwoOpt => {
            two_opt(&mut order, &model, options.two_opt_epsilon);
            model.cost(&order)
        }
        Strategy::Annealing => {
            two_opt(&mut order, &model, options.two_opt_epsilon);
            let (best, cost) = anneal(&order, &model, &options.annealing, rng, cancel);
            order = best;
            cost
        }
        Strategy::Restart => {
            two_opt(&mut order, &model, options.two_opt_epsilon);
            let (best, cost) = restart(
                order,
                &model,
                &options.restart,
                options.two_opt_epsilon,
                rng,
                cancel,
            );
            order = best;
            cost
        }
    };

    let cost_km = ensure_finite(cost)?;
    tracing::debug!(cost_km, "route optimized");

    Ok(OptimizationResult {
        tour: Tour::from_vec(order),
        cost_km,
    })
}
