//! Deterministic estimators and small builders.

use std::collections::HashMap;

use chrono::NaiveTime;
use route_planner::matrix::TravelMatrix;
use route_planner::{Coordinate, TimeWindow, TravelEstimate, TravelEstimator};

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid test time")
}

pub fn window(open: (u32, u32), close: (u32, u32)) -> TimeWindow {
    TimeWindow::new(hm(open.0, open.1), hm(close.0, close.1))
}

fn key(point: Coordinate) -> (u64, u64) {
    (point.lat.to_bits(), point.lng.to_bits())
}

/// Answers from a fixed table of coordinate pairs; unknown pairs cost
/// `default_minutes`.
pub struct TableEstimator {
    legs: HashMap<((u64, u64), (u64, u64)), TravelEstimate>,
    default_minutes: i32,
}

impl TableEstimator {
    pub fn new(default_minutes: i32) -> Self {
        Self {
            legs: HashMap::new(),
            default_minutes,
        }
    }

    /// Same time both ways; distance is minutes / 2 km.
    pub fn leg(mut self, a: Coordinate, b: Coordinate, minutes: i32) -> Self {
        let estimate = TravelEstimate::new(minutes, minutes as f64 / 2.0);
        self.legs.insert((key(a), key(b)), estimate);
        self.legs.insert((key(b), key(a)), estimate);
        self
    }
}

impl TravelEstimator for TableEstimator {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        self.legs
            .get(&(key(from), key(to)))
            .copied()
            .unwrap_or(TravelEstimate::new(self.default_minutes, self.default_minutes as f64 / 2.0))
    }

    fn name(&self) -> &str {
        "table"
    }
}

/// Travel minutes = Manhattan distance of the coordinates (1 unit = 1 minute).
pub struct ManhattanEstimator;

impl TravelEstimator for ManhattanEstimator {
    fn estimate(&self, from: Coordinate, to: Coordinate) -> TravelEstimate {
        let units = (from.lat - to.lat).abs() + (from.lng - to.lng).abs();
        TravelEstimate::new(units.round() as i32, units)
    }

    fn name(&self) -> &str {
        "manhattan"
    }
}

/// Matrix with the given symmetric legs between node ids.
pub fn matrix_of(legs: &[(&str, &str, i32)]) -> TravelMatrix {
    let mut matrix = TravelMatrix::new();
    for &(a, b, minutes) in legs {
        matrix.insert(a, b, TravelEstimate::new(minutes, minutes as f64));
        matrix.insert(b, a, TravelEstimate::new(minutes, minutes as f64));
    }
    matrix
}
