//! Tour length under a given topology.

use crate::error::{Error, Result, ensure_finite};
use crate::haversine::distance;
use crate::model::{Anchor, Point, Topology};
use crate::traits::{DistanceMetric, Place};

/// Length of `order` over `points` in kilometers.
///
/// Evaluates every leg directly; use [`CostModel`] when the same points are
/// costed many times.
pub fn route_cost(
    order: &[usize],
    points: &[Point],
    anchor: Option<Anchor>,
    topology: Topology,
) -> Result<f64> {
    if order.is_empty() {
        return Ok(0.0);
    }
    if let Some(&bad) = order.iter().find(|&&index| index >= points.len()) {
        return Err(Error::invalid_input(format!(
            "tour index {} out of range for {} points",
            bad,
            points.len()
        )));
    }

    let at = |index: usize| points[index].location();
    let first = at(order[0]);
    let last = at(order[order.len() - 1]);

    let mut total = 0.0;
    let anchor_location = if topology.anchored {
        let anchor = anchor.ok_or_else(|| {
            Error::degenerate_input("anchored topology requested without an anchor")
        })?;
        let location = anchor.location();
        total += distance(location, first);
        Some(location)
    } else {
        None
    };

    for pair in order.windows(2) {
        total += distance(at(pair[0]), at(pair[1]));
    }

    if topology.closed {
        total += match anchor_location {
            Some(location) => distance(last, location),
            None => distance(last, first),
        };
    }

    ensure_finite(total)
}

/// Precomputed leg lengths for one request.
///
/// Holds the point-to-point matrix plus, when the topology is anchored, the
/// anchor-to-point legs. Shared read-only between restart trials.
#[derive(Debug, Clone)]
pub struct CostModel {
    matrix: Vec<Vec<f64>>,
    anchor_legs: Option<Vec<f64>>,
    topology: Topology,
}

impl CostModel {
    pub fn new<M: DistanceMetric + ?Sized>(
        locations: &[(f64, f64)],
        anchor: Option<Anchor>,
        topology: Topology,
        metric: &M,
    ) -> Result<Self> {
        let anchor_legs = if topology.anchored {
            let anchor = anchor.ok_or_else(|| {
                Error::degenerate_input("anchored topology requested without an anchor")
            })?;
            let from = anchor.location();
            Some(
                locations
                    .iter()
                    .map(|to| metric.distance_km(from, *to))
                    .collect(),
            )
        } else {
            None
        };

        Ok(Self {
            matrix: metric.matrix_for(locations),
            anchor_legs,
            topology,
        })
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.matrix[from][to]
    }

    /// Anchor-to-point leg, present only for anchored topologies.
    #[inline]
    pub fn anchor_distance(&self, index: usize) -> Option<f64> {
        self.anchor_legs.as_ref().map(|legs| legs[index])
    }

    /// Same sum as [`route_cost`], read from the tables.
    pub fn cost(&self, order: &[usize]) -> f64 {
        if order.is_empty() {
            return 0.0;
        }

        let first = order[0];
        let last = order[order.len() - 1];

        let mut total = 0.0;
        if let Some(legs) = &self.anchor_legs {
            total += legs[first];
        }

        for pair in order.windows(2) {
            total += self.matrix[pair[0]][pair[1]];
        }

        if self.topology.closed {
            total += match &self.anchor_legs {
                Some(legs) => legs[last],
                None => self.matrix[last][first],
            };
        }

        total
    }
}
