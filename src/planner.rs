use itertools::Itertools;
use log::{info, warn};

use crate::enumerate::enumerate_key_paths;
use crate::graph::{ExtLine, Graph, StationIdx};
use crate::primitives::{Cost, Satisfaction};
use crate::reconstruct::reconstruct;
use crate::solver::{solve, KeyPoint};

/// State-space guard: the solver builds 2^n * n DP slots, so the key-point
/// count (start included) has to stay bounded.
pub const MAX_KEY_POINTS: usize = 16;

/// A parsed planning request. Read-only for the remainder of processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    /// Station name with its satisfaction and extra dwell cost.
    pub locations: Vec<(String, Satisfaction, Cost)>,
    pub budget: Cost,
    pub start: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PlanError {
    UnknownStation(Box<str>),
    TooManyKeyPoints { given: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanResult {
    /// Visited key points in order, start at both ends.
    pub key_path: Vec<String>,
    /// The full concrete station sequence.
    pub full_path: Vec<String>,
    pub satisfaction: Satisfaction,
    /// Edge cost of the route; dwell times count against the budget but are
    /// not part of this total.
    pub total_travel_time: Cost,
}

pub fn build_graph(lines: &[ExtLine]) -> Graph {
    Graph::create(lines)
}

/// Computes the exact maximum-satisfaction tour for one request.
///
/// Key points are indexed start-first, then in lexicographic station-name
/// order, which pins down the tie-break order of the solver independently of
/// the iteration order of the request document. The start station is always
/// its own key point with satisfaction 0 and dwell cost 0, even if the
/// request lists it among the locations.
pub fn plan(graph: &Graph, request: &PlanRequest) -> Result<PlanResult, PlanError> {
    let start_station = resolve(graph, &request.start)?;

    let mut key_points = vec![KeyPoint {
        station: start_station,
        satisfaction: 0,
        dwell_cost: 0,
    }];
    let sorted = request
        .locations
        .iter()
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .dedup_by(|a, b| a.0 == b.0)
        .collect_vec();
    if sorted.len() < request.locations.len() {
        warn!("Request lists the same station more than once; keeping the first entry");
    }
    for (name, satisfaction, dwell_cost) in sorted {
        let station = resolve(graph, name)?;
        if station == start_station {
            // The start is implicitly a key point with zero reward and zero
            // dwell; it is never counted twice.
            continue;
        }
        key_points.push(KeyPoint {
            station,
            satisfaction: *satisfaction,
            dwell_cost: *dwell_cost,
        });
    }
    if key_points.len() > MAX_KEY_POINTS {
        return Err(PlanError::TooManyKeyPoints {
            given: key_points.len(),
            max: MAX_KEY_POINTS,
        });
    }

    info!(
        "Planning tour from {} over {} key points with budget {}",
        request.start,
        key_points.len() - 1,
        request.budget
    );

    let stations: Vec<StationIdx> = key_points.iter().map(|it| it.station).collect();
    let paths = enumerate_key_paths(graph, &stations, request.budget);
    let (table, end) = solve(&key_points, &paths, request.budget, 0, graph.num_stations());
    let itinerary = reconstruct(&table, &end, &paths, 0, start_station);

    info!(
        "Best tour visits {} key points, satisfaction {}, travel time {}",
        itinerary.key_points.len().saturating_sub(2),
        end.satisfaction,
        itinerary.travel_cost
    );

    Ok(PlanResult {
        key_path: itinerary
            .key_points
            .iter()
            .map(|&it| graph.station_name(key_points[it].station).to_string())
            .collect(),
        full_path: itinerary
            .stations
            .iter()
            .map(|&it| graph.station_name(it).to_string())
            .collect(),
        satisfaction: end.satisfaction,
        total_travel_time: itinerary.travel_cost,
    })
}

fn resolve(graph: &Graph, name: &str) -> Result<StationIdx, PlanError> {
    graph
        .station_idx(name)
        .ok_or_else(|| PlanError::UnknownStation(name.into()))
}
