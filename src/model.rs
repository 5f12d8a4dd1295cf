//! Value types passed into and out of the optimizer.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::Place;

/// A named point of interest.
///
/// Identity is its position in the request's point list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }
}

impl Place for Point {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// A live location that is not itself one of the points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub lat: f64,
    pub lon: f64,
}

impl Anchor {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl Place for Anchor {
    fn name(&self) -> &str {
        "You"
    }

    fn location(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// Which edges take part in the tour cost.
///
/// The default is a closed loop over the points, starting at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topology {
    /// Last stop connects back to the first stop (or the anchor).
    pub closed: bool,
    /// The anchor, not a point, is where the tour starts.
    pub anchored: bool,
}

impl Topology {
    pub const fn new(closed: bool, anchored: bool) -> Self {
        Self { closed, anchored }
    }

    pub const fn closed_loop() -> Self {
        Self::new(true, false)
    }

    pub const fn open_path() -> Self {
        Self::new(false, false)
    }

    /// Leave from the anchor, visit every point, come back.
    pub const fn round_trip_from_anchor() -> Self {
        Self::new(true, true)
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::closed_loop()
    }
}

/// A visiting order: a permutation of `0..n` over the request's points.
///
/// Deserializing checks the order is a permutation of its own length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>")]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wraps an order after checking it is a permutation of `0..n`.
    pub fn from_order(order: Vec<usize>, n: usize) -> Result<Self> {
        if !is_permutation(&order, n) {
            return Err(Error::invalid_input(format!(
                "order {:?} is not a permutation of 0..{}",
                order, n
            )));
        }
        Ok(Self(order))
    }

    /// The strategies only ever produce permutations, so they skip the check.
    pub(crate) fn from_vec(order: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&order, order.len()));
        Self(order)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = Error;

    fn try_from(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        Self::from_order(order, n)
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

pub(crate) fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &index in order {
        if index >= n || seen[index] {
            return false;
        }
        seen[index] = true;
    }
    true
}

/// Everything a strategy needs: points, optional anchor, topology.
///
/// Validated once on construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationRequest {
    points: Vec<Point>,
    anchor: Option<Anchor>,
    topology: Topology,
}

impl OptimizationRequest {
    pub fn new(points: Vec<Point>, anchor: Option<Anchor>, topology: Topology) -> Result<Self> {
        if let Some(bad) = points.iter().find(|p| !p.lat.is_finite() || !p.lon.is_finite()) {
            return Err(Error::invalid_input(format!(
                "point '{}' has non-finite coordinates ({}, {})",
                bad.name, bad.lat, bad.lon
            )));
        }
        if let Some(anchor) = anchor {
            if !anchor.lat.is_finite() || !anchor.lon.is_finite() {
                return Err(Error::invalid_input(format!(
                    "anchor has non-finite coordinates ({}, {})",
                    anchor.lat, anchor.lon
                )));
            }
        }
        if topology.anchored && anchor.is_none() {
            return Err(Error::degenerate_input(
                "anchored topology requested without an anchor",
            ));
        }

        Ok(Self {
            points,
            anchor,
            topology,
        })
    }

    /// Builds a request from any collection of places.
    pub fn from_places<P: Place>(
        places: &[P],
        anchor: Option<Anchor>,
        topology: Topology,
    ) -> Result<Self> {
        let points = places
            .iter()
            .map(|place| {
                let (lat, lon) = place.location();
                Point::new(place.name(), lat, lon)
            })
            .collect();
        Self::new(points, anchor, topology)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fails unless `tour` visits every point of this request exactly once.
    pub fn check_tour(&self, tour: &Tour) -> Result<()> {
        if !is_permutation(tour.indices(), self.len()) {
            return Err(Error::invalid_input(format!(
                "tour {:?} does not cover the {} points of this request",
                tour.indices(),
                self.len()
            )));
        }
        Ok(())
    }

    /// Point coordinates in request order.
    pub fn locations(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(Place::location).collect()
    }
}

/// A visiting order plus its length in kilometers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub tour: Tour,
    pub cost_km: f64,
}
