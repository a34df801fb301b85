//! Greedy time-window-aware route construction.
//!
//! One technician, one day. Stops are appended one at a time, always taking
//! the best-scoring unvisited stop from the current position. There is no
//! backtracking and no improvement pass. Stops that cannot honour their
//! window are still scheduled and reported through warnings.

use tracing::{debug, info, warn};

use crate::clock;
use crate::error::Result;
use crate::haversine::HaversineEstimator;
use crate::matrix::{TravelMatrix, build_matrix, request_nodes};
use crate::model::{
    HOME_NODE_ID, OptimizeRequest, OptimizeResponse, OptimizedStop, Priority, START_NODE_ID, Stop,
};
use crate::scoring::{Score, check_feasibility, score};
use crate::traits::{TravelEstimate, TravelEstimator};
use crate::validate::validate_request;

/// Leg used when the matrix has no entry for a pair.
pub const DEFAULT_LEG: TravelEstimate = TravelEstimate::new(30, 0.0);

/// A stop whose window closes this soon after the start is visited first.
pub const FORCED_FIRST_HORIZON_MINUTES: i32 = 4 * 60;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTotals {
    pub distance_km: f64,
    pub drive_minutes: i32,
    pub service_minutes: i32,
}

/// Everything that changes from one greedy step to the next.
#[derive(Debug, Clone)]
pub struct RouteState<'a> {
    pub current_minutes: i32,
    /// Matrix node id of where the technician is; `None` before the first
    /// stop when no start location or home base was given.
    pub position: Option<&'a str>,
    /// Still to visit, in input order.
    pub unvisited: Vec<&'a Stop>,
    pub totals: RouteTotals,
    pub route: Vec<OptimizedStop>,
    pub warnings: Vec<String>,
    pub feasible: bool,
}

impl<'a> RouteState<'a> {
    /// Start at `startTime`, positioned at `__start__` when a start location
    /// is given, else at `__home__` when a home base is given. Without
    /// either there is no position and the first leg is free.
    pub fn new(request: &'a OptimizeRequest) -> Self {
        let position = if request.start_location.is_some() {
            Some(START_NODE_ID)
        } else if request.home_base.is_some() {
            Some(HOME_NODE_ID)
        } else {
            None
        };

        Self {
            current_minutes: request.start_minutes(),
            position,
            unvisited: request.stops.iter().collect(),
            totals: RouteTotals::default(),
            route: Vec::with_capacity(request.stops.len()),
            warnings: Vec::new(),
            feasible: true,
        }
    }

    pub fn is_done(&self) -> bool {
        self.unvisited.is_empty()
    }

    fn record_infeasible(&mut self, message: String) {
        warn!(%message, "route infeasible");
        self.warnings.push(message);
        self.feasible = false;
    }

    /// Schedule `unvisited[index]`, reached via `leg`, and move there.
    pub fn visit(mut self, index: usize, leg: TravelEstimate) -> Self {
        let stop = self.unvisited.remove(index);
        let raw_arrival = self.current_minutes + leg.duration_minutes;

        let feasibility = check_feasibility(stop, raw_arrival);
        if !feasibility.feasible {
            self.record_infeasible(format!("Cannot reach {} before close time", stop.name));
        }

        let arrival = raw_arrival + feasibility.wait_minutes;
        let departure = arrival + stop.service_minutes();

        self.route.push(OptimizedStop {
            id: stop.id.clone(),
            name: stop.name.clone(),
            order: self.route.len() + 1,
            arrival_time: clock::format_minutes(arrival),
            departure_time: clock::format_minutes(departure),
            wait_time: (feasibility.wait_minutes > 0).then_some(feasibility.wait_minutes),
            travel_time_from_previous: leg.duration_minutes,
            distance_from_previous: leg.distance_km,
        });

        self.totals.distance_km += leg.distance_km;
        self.totals.drive_minutes += leg.duration_minutes;
        self.totals.service_minutes += stop.service_minutes();
        self.current_minutes = departure;
        self.position = Some(stop.id.as_str());
        self
    }
}

/// Leg from the current position to `to`. Zero when there is no position yet.
fn leg_from(matrix: &TravelMatrix, position: Option<&str>, to: &str) -> TravelEstimate {
    match position {
        None => TravelEstimate::new(0, 0.0),
        Some(from) => matrix.get(from, to).unwrap_or_else(|| {
            debug!(from, to, "no matrix entry, using default leg");
            DEFAULT_LEG
        }),
    }
}

/// The greedy pick for the next step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Index into `RouteState::unvisited`.
    pub index: usize,
    pub leg: TravelEstimate,
    /// No candidate was feasible; `index` is just the first remaining stop.
    pub forced: bool,
}

/// Best-scoring unvisited stop. Ties keep the earliest stop in input order.
pub fn select_next(state: &RouteState<'_>, matrix: &TravelMatrix) -> Option<Selection> {
    let mut best: Option<(Score, Selection)> = None;

    for (index, stop) in state.unvisited.iter().enumerate() {
        let leg = leg_from(matrix, state.position, &stop.id);
        let candidate = score(stop, leg.duration_minutes, state.current_minutes);
        if !candidate.is_feasible() {
            continue;
        }
        if best.is_none_or(|(best_score, _)| candidate > best_score) {
            best = Some((
                candidate,
                Selection {
                    index,
                    leg,
                    forced: false,
                },
            ));
        }
    }

    best.map(|(_, selection)| selection).or_else(|| {
        let stop = state.unvisited.first()?;
        Some(Selection {
            index: 0,
            leg: leg_from(matrix, state.position, &stop.id),
            forced: true,
        })
    })
}

/// Stop that must open the route: the most urgent one by (priority desc,
/// close asc) when it is high priority or its window closes within four
/// hours of the start.
pub fn forced_first_stop<'a>(stops: &'a [Stop], start_minutes: i32) -> Option<&'a Stop> {
    let mut ranked: Vec<&Stop> = stops.iter().collect();
    ranked.sort_by(|a, b| {
        b.priority()
            .cmp(&a.priority())
            .then(a.close_minutes().cmp(&b.close_minutes()))
    });

    let first = *ranked.first()?;
    let closes_soon = first
        .time_window
        .is_some_and(|window| window.close_minutes() - start_minutes <= FORCED_FIRST_HORIZON_MINUTES);

    (first.priority() == Priority::High || closes_soon).then_some(first)
}

/// Build the route from a precomputed matrix.
///
/// A return-home leg missing from the matrix is estimated with the default
/// haversine speed; see [`construct_route_with_fallback`].
pub fn construct_route(request: &OptimizeRequest, matrix: &TravelMatrix) -> OptimizeResponse {
    construct_route_with_fallback(request, matrix, &HaversineEstimator::default())
}

/// Build the route from a precomputed matrix, estimating a missing
/// return-home leg with `fallback`.
pub fn construct_route_with_fallback<E>(
    request: &OptimizeRequest,
    matrix: &TravelMatrix,
    fallback: &E,
) -> OptimizeResponse
where
    E: TravelEstimator + ?Sized,
{
    let start_minutes = request.start_minutes();
    let mut state = RouteState::new(request);

    if let Some(first) = forced_first_stop(&request.stops, start_minutes) {
        debug!(stop = %first.id, "forcing first stop");
        if let Some(index) = state.unvisited.iter().position(|stop| stop.id == first.id) {
            let leg = leg_from(matrix, state.position, &first.id);
            state = state.visit(index, leg);
        }
    }

    while !state.is_done() {
        let Some(selection) = select_next(&state, matrix) else {
            break;
        };
        if selection.forced {
            let name = &state.unvisited[selection.index].name;
            let message = format!("{name} may not be reachable within time window");
            state.record_infeasible(message);
        }
        state = state.visit(selection.index, selection.leg);
    }

    let mut return_leg = None;
    if let (true, Some(home), Some(last)) = (request.return_home, &request.home_base, state.position) {
        if !state.route.is_empty() {
            let leg = matrix.get(last, HOME_NODE_ID).unwrap_or_else(|| {
                let from = request
                    .stops
                    .iter()
                    .find(|stop| stop.id == last)
                    .map(Stop::location)
                    .unwrap_or_else(|| home.location());
                debug!(from = last, estimator = fallback.name(), "no return-home entry, estimating");
                fallback.estimate(from, home.location())
            });
            state.totals.distance_km += leg.distance_km;
            state.totals.drive_minutes += leg.duration_minutes;
            state.current_minutes += leg.duration_minutes;
            return_leg = Some(leg);
        }
    }

    let response = OptimizeResponse {
        optimized_route: state.route,
        total_duration: state.current_minutes - start_minutes,
        total_distance: state.totals.distance_km,
        total_drive_time: state.totals.drive_minutes,
        total_service_time: state.totals.service_minutes,
        estimated_end_time: clock::format_minutes(state.current_minutes),
        feasible: state.feasible,
        warnings: (!state.warnings.is_empty()).then_some(state.warnings),
        return_to_home_time: return_leg.map(|leg| leg.duration_minutes),
        return_to_home_distance: return_leg.map(|leg| leg.distance_km),
    };

    info!(
        stops = response.optimized_route.len(),
        total_minutes = response.total_duration,
        feasible = response.feasible,
        "route constructed"
    );

    response
}

/// Validate the request, build the travel matrix and construct the route.
///
/// Errors only on malformed input; unreachable windows are reported on the
/// response instead.
pub fn optimize_route<E>(request: &OptimizeRequest, estimator: &E) -> Result<OptimizeResponse>
where
    E: TravelEstimator + ?Sized,
{
    validate_request(request)?;

    if request.stops.is_empty() {
        return Ok(construct_route_with_fallback(request, &TravelMatrix::new(), estimator));
    }

    let matrix = build_matrix(estimator, &request_nodes(request));
    Ok(construct_route_with_fallback(request, &matrix, estimator))
}
