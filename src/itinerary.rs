//! Stepped itinerary for an optimized tour.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::haversine::distance;
use crate::model::{OptimizationRequest, OptimizationResult};
use crate::solver::Strategy;
use crate::traits::Place;

/// One numbered stop along the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    /// 1-based position in the itinerary.
    pub number: usize,
    /// Index into the request's points; `None` for the anchor.
    pub point_index: Option<usize>,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Distance walked from the previous stop.
    pub leg_km: f64,
    pub cumulative_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub label: &'static str,
    pub start_label: String,
    pub stops: Vec<Stop>,
    /// Leg from the last stop back to the start, for closed tours.
    pub return_leg_km: Option<f64>,
    pub total_km: f64,
}

impl Itinerary {
    /// Fails if the result's tour was not produced for `request`.
    pub fn new(
        request: &OptimizationRequest,
        result: &OptimizationResult,
        strategy: Strategy,
    ) -> Result<Self> {
        request.check_tour(&result.tour)?;
        let topology = request.topology();
        let anchor = request.anchor().filter(|_| topology.anchored);

        let mut stops: Vec<Stop> = Vec::with_capacity(result.tour.len() + 1);
        let mut previous: Option<(f64, f64)> = None;
        let mut cumulative_km = 0.0;

        let mut push = |point_index: Option<usize>, name: &str, location: (f64, f64)| {
            let leg_km = previous.map_or(0.0, |from| distance(from, location));
            cumulative_km += leg_km;
            stops.push(Stop {
                number: stops.len() + 1,
                point_index,
                name: name.to_string(),
                lat: location.0,
                lon: location.1,
                leg_km,
                cumulative_km,
            });
            previous = Some(location);
        };

        if let Some(anchor) = anchor {
            push(None, anchor.name(), anchor.location());
        }
        for &index in result.tour.indices() {
            let point = &request.points()[index];
            push(Some(index), point.name(), point.location());
        }

        let return_leg_km = match (stops.first(), stops.last()) {
            (Some(first), Some(last)) if topology.closed => {
                Some(distance((last.lat, last.lon), (first.lat, first.lon)))
            }
            _ => None,
        };

        let start_label = match (anchor, stops.first()) {
            (Some(_), _) => "My Location".to_string(),
            (None, Some(first)) => first.name.clone(),
            (None, None) => String::new(),
        };

        Ok(Self {
            label: strategy.label(),
            start_label,
            stops,
            return_leg_km,
            total_km: result.cost_km,
        })
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} | Start: {} | Distance: {:.2} km | Stops: {}",
            self.label,
            self.start_label,
            self.total_km,
            self.stops.len()
        )?;
        for stop in &self.stops {
            writeln!(f, "{:>3}. {} ({:.4}, {:.4})", stop.number, stop.name, stop.lat, stop.lon)?;
        }
        if let (Some(km), Some(first)) = (self.return_leg_km, self.stops.first()) {
            writeln!(f, "  -> back to {} ({:.2} km)", first.name, km)?;
        }
        Ok(())
    }
}
