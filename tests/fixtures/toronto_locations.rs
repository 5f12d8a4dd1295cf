//! Downtown Toronto locations for realistic test fixtures.
//!
//! Coordinates are approximate OpenStreetMap positions, all within walking
//! distance of one another.

use sidequest_router::Point;
use sidequest_router::traits::Place;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn point(&self) -> Point {
        Point::new(self.name, self.lat, self.lon)
    }
}

impl Place for Location {
    fn name(&self) -> &str {
        self.name
    }

    fn location(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

// ============================================================================
// Landmarks
// ============================================================================

pub const LANDMARKS: &[Location] = &[
    Location::new("CN Tower", 43.6426, -79.3871),
    Location::new("Union Station", 43.6453, -79.3806),
    Location::new("St. Lawrence Market", 43.6487, -79.3715),
    Location::new("Nathan Phillips Square", 43.6525, -79.3839),
    Location::new("Art Gallery of Ontario", 43.6536, -79.3925),
    Location::new("Royal Ontario Museum", 43.6677, -79.3948),
    Location::new("Casa Loma", 43.6780, -79.4094),
    Location::new("Kensington Market", 43.6547, -79.4005),
    Location::new("Distillery District", 43.6503, -79.3596),
    Location::new("Harbourfront Centre", 43.6387, -79.3816),
];

// ============================================================================
// Cafés
// ============================================================================

pub const CAFES: &[Location] = &[
    Location::new("Pilot Coffee Roasters", 43.6456, -79.3950),
    Location::new("Jimmy's Coffee Baldwin", 43.6562, -79.3937),
    Location::new("Sam James Harbord", 43.6613, -79.4042),
    Location::new("Balzac's Distillery", 43.6502, -79.3595),
    Location::new("Neo Coffee Bar", 43.6540, -79.3760),
    Location::new("Dark Horse Spadina", 43.6486, -79.3963),
    Location::new("Boxcar Social", 43.6397, -79.3826),
    Location::new("Quantum Coffee", 43.6447, -79.3980),
];

/// Toronto City Hall, roughly central to the landmarks.
pub const CITY_HALL: (f64, f64) = (43.6534, -79.3841);

/// Returns all locations as points.
pub fn all_points() -> Vec<Point> {
    LANDMARKS.iter().chain(CAFES).map(Location::point).collect()
}

/// Returns a subset of points for smaller tests.
pub fn sample_points(count: usize) -> Vec<Point> {
    all_points().into_iter().take(count).collect()
}

/// Four corners of a square about 2.2 km on a side, listed so that the
/// nearest-neighbour walk from index 0 is not the perimeter.
pub fn square_corners() -> Vec<Point> {
    let (lat, lon) = CITY_HALL;
    vec![
        Point::new("south-west", lat - 0.01, lon - 0.01),
        Point::new("north-east", lat + 0.01, lon + 0.01),
        Point::new("north-west", lat + 0.01, lon - 0.01),
        Point::new("south-east", lat - 0.01, lon + 0.01),
    ]
}

/// Points evenly spaced on a circle, in scrambled order.
pub fn scrambled_ring(count: usize) -> Vec<Point> {
    let (lat, lon) = CITY_HALL;
    let mut points: Vec<Point> = (0..count)
        .map(|i| {
            let theta = i as f64 / count as f64 * std::f64::consts::TAU;
            Point::new(format!("ring-{}", i), lat + 0.02 * theta.sin(), lon + 0.03 * theta.cos())
        })
        .collect();
    // Deterministic interleave: evens, then odds reversed.
    let odds: Vec<Point> = points.iter().skip(1).step_by(2).rev().cloned().collect();
    points = points.into_iter().step_by(2).collect();
    points.extend(odds);
    points
}
