//! Haversine travel estimator (fallback when the routing provider is unavailable).
//!
//! Uses great-circle distance to estimate travel time.
//! Less accurate than a road network (ignores roads) but always available.

use crate::traits::{Coordinate, TravelEstimate, TravelEstimator};

/// Average driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 50.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine-based travel estimator.
///
/// Estimates travel time using straight-line distance and an assumed speed.
/// Pure: identical coordinate pairs always give identical estimates.
#[derive(Debug, Clone)]
pub struct HaversineEstimator {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineEstimator {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineEstimator {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Calculate haversine distance between two points in kilometers.
    pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    /// Convert distance in km to travel time in whole minutes.
    fn km_to_minutes(&self, km: f64) -> i32 {
        let hours = km / self.speed_kmh;
        (hours * 60.0).round().max(0.0) as i32
    }
}

impl TravelEstimator for HaversineEstimator {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        let km = Self::haversine_km(from, to);
        TravelEstimate::new(self.km_to_minutes(km), km)
    }

    fn name(&self) -> &str {
        "haversine"
    }
}
