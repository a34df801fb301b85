//! route-planner core
//!
//! Greedy single-technician day planning: travel matrix acquisition,
//! time-window feasibility and scoring, and route construction.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod haversine;
pub mod matrix;
pub mod model;
pub mod osrm;
pub mod scoring;
pub mod solver;
pub mod traits;
pub mod validate;

pub use error::{PlannerError, Result};
pub use model::{HomeBase, OptimizeRequest, OptimizeResponse, OptimizedStop, Priority, Stop, TimeWindow};
pub use solver::{construct_route, construct_route_with_fallback, optimize_route};
pub use traits::{Coordinate, TravelEstimate, TravelEstimator};
