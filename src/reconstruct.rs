use crate::enumerate::PathMatrix;
use crate::graph::StationIdx;
use crate::primitives::Cost;
use crate::solver::{DpTable, TourEnd};

/// The expanded tour: key points in visiting order (start at both ends) and
/// the full station-by-station route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    pub key_points: Vec<usize>,
    pub stations: Vec<StationIdx>,
    /// Edge cost of the concrete route, without dwell times.
    pub travel_cost: Cost,
}

/// Expands the solver's backtrace into the concrete route by walking the
/// predecessor chain back to the initial state and concatenating the chosen
/// path records, dropping the duplicated boundary station at each join.
pub fn reconstruct(
    table: &DpTable,
    end: &TourEnd,
    paths: &PathMatrix,
    start: usize,
    start_station: StationIdx,
) -> Itinerary {
    let Some(return_path) = end.return_path else {
        // Trivial tour: never left the start.
        return Itinerary {
            key_points: vec![start],
            stations: vec![start_station],
            travel_cost: 0,
        };
    };

    let mut legs: Vec<(usize, usize, usize)> = Vec::new();
    let mut mask = end.mask;
    let mut current = end.key_point;
    loop {
        let state = table
            .state(mask, current)
            .expect("backtrace refers to an unfilled DP state");
        let Some(pred) = state.predecessor else {
            break;
        };
        legs.push((pred.key_point, current, pred.path));
        mask = pred.mask;
        current = pred.key_point;
    }
    legs.reverse();

    let mut key_points = vec![start];
    let mut stations = vec![start_station];
    let mut travel_cost = 0;
    for (from, to, path_idx) in legs {
        let record = &paths.between(from, to)[path_idx];
        stations.extend_from_slice(&record.stations()[1..]);
        travel_cost += record.cost();
        key_points.push(to);
    }

    let way_home = &paths.between(end.key_point, start)[return_path];
    stations.extend_from_slice(&way_home.stations()[1..]);
    travel_cost += way_home.cost();
    key_points.push(start);

    Itinerary {
        key_points,
        stations,
        travel_cost,
    }
}
