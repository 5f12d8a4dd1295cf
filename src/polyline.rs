//! Polyline representation for drawing a tour.
//!
//! Coordinates are kept decoded; any compact encoding for a map widget
//! happens at the boundary, not here.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{OptimizationRequest, Tour};
use crate::traits::Place;

/// A path as an ordered list of (latitude, longitude) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// The path a walker follows for `tour`.
    ///
    /// Anchored tours start at the anchor; closed tours end where they began.
    /// Fails if `tour` is not a permutation of the request's points.
    pub fn for_tour(request: &OptimizationRequest, tour: &Tour) -> Result<Self> {
        request.check_tour(tour)?;
        let indices = tour.indices();
        if indices.is_empty() {
            return Ok(Self::new(Vec::new()));
        }

        let topology = request.topology();
        let stops = indices.iter().map(|&i| request.points()[i].location());
        let start = match request.anchor() {
            Some(anchor) if topology.anchored => Some(anchor.location()),
            _ => None,
        };

        let mut points: Vec<(f64, f64)> = start.into_iter().chain(stops).collect();
        if topology.closed {
            points.push(points[0]);
        }

        Ok(Self { points })
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// South-west and north-east corners, for fitting a map view.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let (&first, rest) = self.points.split_first()?;
        let mut south_west = first;
        let mut north_east = first;
        for &(lat, lon) in rest {
            south_west = (south_west.0.min(lat), south_west.1.min(lon));
            north_east = (north_east.0.max(lat), north_east.1.max(lon));
        }
        Some((south_west, north_east))
    }
}
