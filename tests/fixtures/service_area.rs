//! Real Las Vegas / Henderson locations used as customer addresses.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.

use route_planner::{Coordinate, HomeBase, Stop};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// A stop at this location with default duration and priority.
    pub fn stop(&self, id: &str) -> Stop {
        Stop::new(id, self.name, self.lat, self.lng)
    }

    pub fn home(&self) -> HomeBase {
        HomeBase {
            lat: self.lat,
            lng: self.lng,
            address: self.name.to_string(),
        }
    }
}

/// Candidate depots.
pub const DEPOTS: &[Location] = &[
    Location::new("Longhorn Casino", 36.1070664, -115.0591256),
    Location::new("Extended Stay America Henderson", 36.1283949, -115.0826989),
];

pub const STRIP_CUSTOMERS: &[Location] = &[
    Location::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Location::new("Public House", 36.1219193, -115.1689317),
    Location::new("Brooklyn Bowl", 36.1175388, -115.1695094),
    Location::new("P.F. Chang's", 36.1103352, -115.1723830),
    Location::new("Spago by Wolfgang Puck", 36.1139368, -115.1741462),
    Location::new("Grand Lux Cafe", 36.1216416, -115.1685024),
    Location::new("Il Fornaio", 36.1024474, -115.1740110),
    Location::new("Strip Steak", 36.0908722, -115.1776176),
];

pub const HENDERSON_CUSTOMERS: &[Location] = &[
    Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
    Location::new("Naga", 36.0137634, -114.9928676),
    Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Location::new("Sunset Station Area", 36.0614, -115.0631),
];

pub const EAST_SIDE_CUSTOMERS: &[Location] = &[
    Location::new("Pei Wei Town Square", 36.0810469, -115.1472694),
    Location::new("Hello Tokyo", 36.1161627, -115.0902096),
    Location::new("Original Lindo Michoacan", 36.1294005, -115.1135106),
    Location::new("Tomo Sushi", 36.0992464, -115.1142123),
    Location::new("Roma Pizza", 36.1012461, -115.0753039),
];

/// Every customer location, grouped strip, Henderson, east side.
pub fn all_customers() -> Vec<Location> {
    let mut all = Vec::new();
    all.extend_from_slice(STRIP_CUSTOMERS);
    all.extend_from_slice(HENDERSON_CUSTOMERS);
    all.extend_from_slice(EAST_SIDE_CUSTOMERS);
    all
}

/// The first `count` customers as stops with ids `s0..`.
pub fn customer_stops(count: usize) -> Vec<Stop> {
    all_customers()
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, loc)| loc.stop(&format!("s{i}")))
        .collect()
}
