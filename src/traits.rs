//! Core seams for travel estimation.
//!
//! The optimizer never talks to a routing provider directly. It is handed a
//! `TravelEstimator` so tests can substitute a deterministic table and
//! production can plug in an HTTP provider.

use serde::{Deserialize, Serialize};

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Estimated leg between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelEstimate {
    /// Whole minutes of driving.
    pub duration_minutes: i32,
    /// Kilometres.
    pub distance_km: f64,
}

impl TravelEstimate {
    pub const fn new(duration_minutes: i32, distance_km: f64) -> Self {
        Self {
            duration_minutes,
            distance_km,
        }
    }
}

/// Provides a travel estimate between two coordinates.
///
/// Implementations must not fail: when the underlying source is unavailable
/// they answer with a geometric estimate instead. Calls may run concurrently
/// from the matrix builder, hence `Send + Sync`.
pub trait TravelEstimator: Send + Sync {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate;

    /// Short name for logging.
    fn name(&self) -> &str;
}

impl<T: TravelEstimator + ?Sized> TravelEstimator for Box<T> {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        (**self).estimate(from, to)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: TravelEstimator + ?Sized> TravelEstimator for &T {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        (**self).estimate(from, to)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
