//! Feasibility and candidate scoring for the greedy constructor.
//!
//! All functions here are pure. Clock values are minutes since midnight of
//! the planning day and may exceed 1440.

use crate::model::Stop;

/// Slack under which a windowed stop gets the urgency bonus.
pub const URGENT_SLACK_MINUTES: i32 = 60;
pub const URGENCY_BONUS: i32 = 50;
/// Multiplied by the priority weight.
pub const PRIORITY_BONUS_PER_WEIGHT: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feasibility {
    pub feasible: bool,
    pub wait_minutes: i32,
}

impl Feasibility {
    const fn ok(wait_minutes: i32) -> Self {
        Self {
            feasible: true,
            wait_minutes,
        }
    }

    const fn infeasible() -> Self {
        Self {
            feasible: false,
            wait_minutes: 0,
        }
    }
}

/// Can `stop` be served when arriving at `arrival_minutes`, and how long
/// must the technician wait for the window to open?
pub fn check_feasibility(stop: &Stop, arrival_minutes: i32) -> Feasibility {
    let Some(window) = stop.time_window else {
        return Feasibility::ok(0);
    };

    if arrival_minutes > window.close_minutes() {
        return Feasibility::infeasible();
    }

    let open = window.open_minutes();
    if arrival_minutes < open {
        Feasibility::ok(open - arrival_minutes)
    } else {
        Feasibility::ok(0)
    }
}

/// Ranking of a candidate; higher `Feasible` values are better and any
/// `Feasible` beats `Infeasible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Score {
    Infeasible,
    Feasible(i32),
}

impl Score {
    pub fn is_feasible(self) -> bool {
        matches!(self, Score::Feasible(_))
    }
}

/// Score `stop` as the next visit, reached after `travel_minutes` from a
/// clock of `current_minutes`.
pub fn score(stop: &Stop, travel_minutes: i32, current_minutes: i32) -> Score {
    let arrival = current_minutes + travel_minutes;
    let feasibility = check_feasibility(stop, arrival);
    if !feasibility.feasible {
        return Score::Infeasible;
    }

    let mut cost = travel_minutes + feasibility.wait_minutes;

    if let Some(window) = stop.time_window {
        let slack = window.close_minutes() - (arrival + feasibility.wait_minutes);
        if slack < URGENT_SLACK_MINUTES {
            cost -= URGENCY_BONUS;
        }
    }

    cost -= stop.priority().weight() * PRIORITY_BONUS_PER_WEIGHT;

    Score::Feasible(-cost)
}
