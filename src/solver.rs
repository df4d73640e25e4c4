use std::cmp::Ordering;

use crate::enumerate::PathMatrix;
use crate::graph::StationIdx;
use crate::primitives::{Cost, Satisfaction};
use crate::station_set::StationSet;

/// A station of interest with its reward and the extra time spent visiting it.
/// The start station takes part as a key point with satisfaction 0 and dwell
/// cost 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPoint {
    pub station: StationIdx,
    pub satisfaction: Satisfaction,
    pub dwell_cost: Cost,
}

/// Backtracking record of a DP state: where the tour stood before its last
/// hop, and which enumerated path carried it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predecessor {
    pub mask: usize,
    pub key_point: usize,
    /// Index into `PathMatrix::between(key_point, <current>)`.
    pub path: usize,
}

/// Best known partial tour for (visited key-point set, current key point).
/// A slot is strictly improved or left untouched, never weakened.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub satisfaction: Satisfaction,
    /// Travel plus dwell spent so far.
    pub cost: Cost,
    visited: StationSet,
    order: Vec<u8>,
    pub predecessor: Option<Predecessor>,
}

impl SearchState {
    /// Key-point indices in visiting order, start first.
    pub fn key_order(&self) -> &[u8] {
        &self.order
    }
}

/// DP table over (key-point subset bitmask, current key point).
pub struct DpTable {
    slots: Vec<Option<Box<SearchState>>>,
    num_key_points: usize,
}

impl DpTable {
    fn new(num_key_points: usize) -> Self {
        Self {
            slots: vec![None; (1 << num_key_points) * num_key_points],
            num_key_points,
        }
    }

    pub fn state(&self, mask: usize, key_point: usize) -> Option<&SearchState> {
        self.slots[mask * self.num_key_points + key_point].as_deref()
    }

    fn slot_mut(&mut self, mask: usize, key_point: usize) -> &mut Option<Box<SearchState>> {
        &mut self.slots[mask * self.num_key_points + key_point]
    }
}

/// Where the best tour ends: the winning DP state plus the return path that
/// closes it. `return_path` is `None` only for the trivial tour that never
/// leaves the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourEnd {
    pub mask: usize,
    pub key_point: usize,
    pub return_path: Option<usize>,
    pub satisfaction: Satisfaction,
    pub total_cost: Cost,
}

/// Exact orienteering over the key points: picks the visitation subset and
/// order, starting and ending at `start`, that maximizes satisfaction within
/// `budget`.
///
/// Ties are broken by lower total cost, then by lexicographically smallest
/// key-point-index sequence, so equal-valued inputs always produce the same
/// tour. Unreachable pairs have empty path sets and simply contribute no
/// transitions; if nothing is reachable the trivial tour wins with
/// satisfaction 0, which is not an error.
pub fn solve(
    key_points: &[KeyPoint],
    paths: &PathMatrix,
    budget: Cost,
    start: usize,
    num_stations: usize,
) -> (DpTable, TourEnd) {
    let n = key_points.len();
    let mut table = DpTable::new(n);

    let start_mask = 1 << start;
    let mut at_start = StationSet::new(num_stations);
    at_start.insert(key_points[start].station);
    *table.slot_mut(start_mask, start) = Some(Box::new(SearchState {
        satisfaction: 0,
        cost: 0,
        visited: at_start,
        order: vec![start as u8],
        predecessor: None,
    }));

    for mask in start_mask..1 << n {
        if mask & start_mask == 0 {
            continue;
        }
        for u in 0..n {
            if mask & (1 << u) == 0 {
                continue;
            }
            let Some(state) = table.state(mask, u).cloned() else {
                continue;
            };
            for (v, key_point) in key_points.iter().enumerate() {
                if mask & (1 << v) != 0 {
                    continue;
                }
                if state.visited.contains(key_point.station) {
                    // The station was already passed through; its reward
                    // cannot be collected a second time.
                    continue;
                }
                for (path_idx, path) in paths.between(u, v).iter().enumerate() {
                    let Some(new_cost) = state
                        .cost
                        .checked_add(path.cost())
                        .and_then(|it| it.checked_add(key_point.dwell_cost))
                    else {
                        // Paths are cost-sorted, later ones only cost more.
                        break;
                    };
                    if new_cost > budget {
                        break;
                    }
                    let new_satisfaction = state.satisfaction + key_point.satisfaction;
                    let slot = table.slot_mut(mask | (1 << v), v);
                    if !improves(slot.as_deref(), new_satisfaction, new_cost, &state.order, v) {
                        continue;
                    }
                    let mut visited = state.visited.clone();
                    visited.extend(path.stations().iter().copied());
                    let mut order = state.order.clone();
                    order.push(v as u8);
                    *slot = Some(Box::new(SearchState {
                        satisfaction: new_satisfaction,
                        cost: new_cost,
                        visited,
                        order,
                        predecessor: Some(Predecessor {
                            mask,
                            key_point: u,
                            path: path_idx,
                        }),
                    }));
                }
            }
        }
    }

    let best = scan_returnable(&table, paths, budget, start);
    (table, best)
}

fn improves(
    current: Option<&SearchState>,
    satisfaction: Satisfaction,
    cost: Cost,
    parent_order: &[u8],
    appended: usize,
) -> bool {
    let Some(current) = current else {
        return true;
    };
    match satisfaction.cmp(&current.satisfaction) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match cost.cmp(&current.cost) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => {
                let candidate = parent_order.iter().copied().chain([appended as u8]);
                candidate.cmp(current.order.iter().copied()) == Ordering::Less
            }
        },
    }
}

/// Scans every filled state that can still afford the way back to the start
/// and picks the best closed tour. The trivial tour is always a candidate.
fn scan_returnable(table: &DpTable, paths: &PathMatrix, budget: Cost, start: usize) -> TourEnd {
    let n = table.num_key_points;
    let trivial_order = [start as u8];
    let mut best = TourEnd {
        mask: 1 << start,
        key_point: start,
        return_path: None,
        satisfaction: 0,
        total_cost: 0,
    };
    let mut best_order: Vec<u8> = trivial_order.to_vec();

    for mask in 0..1 << n {
        for u in 0..n {
            if u == start {
                continue;
            }
            let Some(state) = table.state(mask, u) else {
                continue;
            };
            // Path sets are cost-sorted: the cheapest way home is the head.
            let Some(way_home) = paths.cheapest(u, start) else {
                continue;
            };
            let Some(total_cost) = state.cost.checked_add(way_home.cost()) else {
                continue;
            };
            if total_cost > budget {
                continue;
            }
            let better = match state.satisfaction.cmp(&best.satisfaction) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => match total_cost.cmp(&best.total_cost) {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => state.order.as_slice() < best_order.as_slice(),
                },
            };
            if better {
                best = TourEnd {
                    mask,
                    key_point: u,
                    return_path: Some(0),
                    satisfaction: state.satisfaction,
                    total_cost,
                };
                best_order = state.order.clone();
            }
        }
    }
    best
}
