//! sidequest-router
//!
//! Orders a short list of points of interest for the shortest walk, as an
//! open path, a closed loop, or a round trip from a live location.

pub mod error;
pub mod traits;
pub mod model;
pub mod haversine;
pub mod cost;
pub mod construction;
pub mod two_opt;
pub mod annealing;
pub mod restart;
pub mod solver;
pub mod polyline;
pub mod itinerary;
pub mod poi_csv;
pub mod nominatim;
pub mod overpass;

pub use error::{Error, Result};
pub use model::{Anchor, OptimizationRequest, OptimizationResult, Point, Topology, Tour};
pub use solver::{CancelFlag, SolveOptions, Strategy, solve, solve_with};
