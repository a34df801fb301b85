//! Request/response data for a single optimization run.
//!
//! JSON shapes use camelCase field names and "HH:MM" clock strings.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::clock::{self, hhmm};
use crate::traits::Coordinate;

/// Service duration used when a stop does not state one.
pub const DEFAULT_SERVICE_MINUTES: i32 = 30;

/// Matrix node id of the technician's depot.
pub const HOME_NODE_ID: &str = "__home__";

/// Matrix node id of an explicit start location.
pub const START_NODE_ID: &str = "__start__";

/// Priority class of a stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Scoring weight: high=3, medium=2, low=1.
    pub fn weight(self) -> i32 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// Same-day service window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "hhmm", alias = "start")]
    pub open: NaiveTime,
    #[serde(with = "hhmm", alias = "end")]
    pub close: NaiveTime,
}

impl TimeWindow {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }

    pub fn open_minutes(&self) -> i32 {
        clock::to_minutes(self.open)
    }

    pub fn close_minutes(&self) -> i32 {
        clock::to_minutes(self.close)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    /// On-site minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Stop {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat,
            lng,
            time_window: None,
            duration: None,
            priority: None,
        }
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    pub fn with_duration(mut self, minutes: i32) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn location(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn service_minutes(&self) -> i32 {
        self.duration.unwrap_or(DEFAULT_SERVICE_MINUTES)
    }

    pub fn priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }

    /// Window close in clock minutes; stops without a window close at end of day.
    pub fn close_minutes(&self) -> i32 {
        self.time_window
            .map(|window| window.close_minutes())
            .unwrap_or(clock::MINUTES_PER_DAY)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeBase {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: String,
}

impl HomeBase {
    pub fn location(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub stops: Vec<Stop>,
    #[serde(with = "hhmm", default = "clock::default_start_time")]
    pub start_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_base: Option<HomeBase>,
    #[serde(default)]
    pub return_home: bool,
}

impl OptimizeRequest {
    pub fn new(stops: Vec<Stop>) -> Self {
        Self {
            stops,
            start_time: clock::default_start_time(),
            start_location: None,
            home_base: None,
            return_home: false,
        }
    }

    pub fn starting_at(mut self, start_time: NaiveTime) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn from_location(mut self, location: Coordinate) -> Self {
        self.start_location = Some(location);
        self
    }

    pub fn with_home(mut self, home: HomeBase, return_home: bool) -> Self {
        self.home_base = Some(home);
        self.return_home = return_home;
        self
    }

    pub fn start_minutes(&self) -> i32 {
        clock::to_minutes(self.start_time)
    }
}

/// One scheduled line of the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedStop {
    pub id: String,
    pub name: String,
    /// 1-based position in the route.
    pub order: usize,
    pub arrival_time: String,
    pub departure_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<i32>,
    pub travel_time_from_previous: i32,
    pub distance_from_previous: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub optimized_route: Vec<OptimizedStop>,
    /// Minutes from start to finish, including any return leg.
    pub total_duration: i32,
    pub total_distance: f64,
    pub total_drive_time: i32,
    pub total_service_time: i32,
    pub estimated_end_time: String,
    pub feasible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to_home_time: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to_home_distance: Option<f64>,
}
