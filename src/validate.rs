//! Input checks run before planning.

use std::collections::HashSet;

use crate::clock::MINUTES_PER_DAY;
use crate::error::{PlannerError, Result};
use crate::model::{HOME_NODE_ID, OptimizeRequest, START_NODE_ID, Stop};
use crate::traits::Coordinate;

fn valid_coordinate(location: Coordinate) -> bool {
    location.lat.is_finite()
        && location.lng.is_finite()
        && (-90.0..=90.0).contains(&location.lat)
        && (-180.0..=180.0).contains(&location.lng)
}

fn invalid(stop: &Stop, reason: impl Into<String>) -> PlannerError {
    PlannerError::InvalidStop {
        id: stop.id.clone(),
        reason: reason.into(),
    }
}

fn validate_stop(stop: &Stop) -> Result<()> {
    if stop.id.trim().is_empty() {
        return Err(invalid(stop, "id must not be empty"));
    }
    if stop.id == HOME_NODE_ID || stop.id == START_NODE_ID {
        return Err(invalid(stop, "id is reserved"));
    }
    if !valid_coordinate(stop.location()) {
        return Err(invalid(stop, format!("coordinates ({}, {}) out of range", stop.lat, stop.lng)));
    }
    if let Some(window) = stop.time_window {
        if window.close < window.open {
            return Err(invalid(stop, "time window closes before it opens"));
        }
    }
    if let Some(duration) = stop.duration {
        if duration <= 0 {
            return Err(invalid(stop, format!("service duration {duration} must be positive")));
        }
        if duration > MINUTES_PER_DAY {
            return Err(invalid(stop, format!("service duration {duration} exceeds one day")));
        }
    }
    Ok(())
}

/// Reject requests the planner cannot interpret.
pub fn validate_request(request: &OptimizeRequest) -> Result<()> {
    let mut seen = HashSet::new();
    for stop in &request.stops {
        validate_stop(stop)?;
        if !seen.insert(stop.id.as_str()) {
            return Err(PlannerError::DuplicateStopId(stop.id.clone()));
        }
    }

    if let Some(start) = request.start_location {
        if !valid_coordinate(start) {
            return Err(PlannerError::InvalidRequest {
                field: "startLocation",
                reason: "coordinates out of range".into(),
            });
        }
    }
    if let Some(home) = &request.home_base {
        if !valid_coordinate(home.location()) {
            return Err(PlannerError::InvalidRequest {
                field: "homeBase",
                reason: "coordinates out of range".into(),
            });
        }
    }

    Ok(())
}
