//! Core domain traits for the route optimizer.
//!
//! These are intentionally minimal. The optimizer itself only needs
//! coordinates and a distance function; geocoding and POI discovery are
//! collaborators that produce points for it.

use crate::error::Result;
use crate::model::{Anchor, Point};

/// Anything that sits somewhere on the map.
pub trait Place {
    /// Display name.
    fn name(&self) -> &str;

    /// Location coordinates (lat, lon) in WGS84 degrees.
    fn location(&self) -> (f64, f64);
}

/// Point-to-point distance in kilometers.
///
/// Implementations must be symmetric and return zero for identical points;
/// the local search moves rely on both.
pub trait DistanceMetric: Sync {
    fn distance_km(&self, from: (f64, f64), to: (f64, f64)) -> f64;

    /// Full distance table for a set of locations.
    ///
    /// The matrix is indexed by the provided location order.
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>> {
        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i != j {
                    matrix[i][j] = self.distance_km(*from, *to);
                }
            }
        }

        matrix
    }
}

/// Free-text address search returning at most one hit.
pub trait Geocoder {
    fn search(&self, query: &str) -> Result<Option<Point>>;
}

/// Amenity lookup around a live location.
pub trait PoiDiscovery {
    type Kind;

    fn nearby(&self, around: Anchor, kind: Self::Kind, radius_m: u32) -> Result<Vec<Point>>;
}
