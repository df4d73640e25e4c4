use itertools::Itertools;
use log::debug;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::graph::{Graph, StationIdx};
use crate::primitives::Cost;
use crate::station_set::StationSet;

/// One concrete simple route between two stations with its total edge cost.
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    stations: Box<[StationIdx]>,
    cost: Cost,
}

impl PathRecord {
    pub fn stations(&self) -> &[StationIdx] {
        &self.stations
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn reversed(&self) -> PathRecord {
        PathRecord {
            stations: self.stations.iter().rev().copied().collect(),
            cost: self.cost,
        }
    }
}

/// Enumerates every simple path from `start` to `end` whose accumulated edge
/// cost stays within `max_cost`.
///
/// Exhaustive depth-first search with cost pruning; the ceiling is what keeps
/// the search finite in practice, so callers must always pass the tightest
/// bound they have (the remaining tour budget). The zero-length self path is
/// never emitted: `start == end` yields an empty set.
///
/// Results are sorted by (cost, station sequence) so that downstream
/// tie-breaking is reproducible.
pub fn enumerate_paths(
    graph: &Graph,
    start: StationIdx,
    end: StationIdx,
    max_cost: Cost,
) -> Vec<PathRecord> {
    if start == end {
        return Vec::new();
    }
    let mut found = Vec::new();
    let mut on_path = StationSet::new(graph.num_stations());
    on_path.insert(start);
    let mut prefix = vec![start];
    search(graph, end, max_cost, 0, &mut prefix, &mut on_path, &mut found);
    found.sort_unstable_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.stations.cmp(&b.stations)));
    found.dedup();
    found
}

fn search(
    graph: &Graph,
    end: StationIdx,
    max_cost: Cost,
    cost_so_far: Cost,
    prefix: &mut Vec<StationIdx>,
    on_path: &mut StationSet,
    found: &mut Vec<PathRecord>,
) {
    let current = *prefix.last().unwrap();
    for &(next, weight) in graph.neighbors(current) {
        // An overflowing total is over any ceiling.
        let Some(cost) = cost_so_far.checked_add(weight) else {
            continue;
        };
        if cost > max_cost {
            continue;
        }
        if next == end {
            prefix.push(next);
            found.push(PathRecord {
                stations: prefix.clone().into_boxed_slice(),
                cost,
            });
            prefix.pop();
            continue;
        }
        if !on_path.insert(next) {
            // Already on the current branch; a simple path may not revisit it.
            continue;
        }
        prefix.push(next);
        search(graph, end, max_cost, cost, prefix, on_path, found);
        prefix.pop();
        on_path.remove(next);
    }
}

/// Path sets between every ordered key-point pair, indexed by key-point
/// indices. Built once per request and read-only afterwards.
pub struct PathMatrix {
    sets: Box<[Box<[PathRecord]>]>,
    num_key_points: usize,
}

impl PathMatrix {
    pub fn between(&self, from: usize, to: usize) -> &[PathRecord] {
        &self.sets[from * self.num_key_points + to]
    }

    /// The cheapest path between two key points, if any. The underlying sets
    /// are cost-sorted, so this is the head element.
    pub fn cheapest(&self, from: usize, to: usize) -> Option<&PathRecord> {
        self.between(from, to).first()
    }
}

/// Runs the enumerator once per unordered key-point pair (fanned out over
/// worker threads) and derives the reverse direction by reversing each found
/// path rather than re-searching.
pub fn enumerate_key_paths(
    graph: &Graph,
    key_stations: &[StationIdx],
    max_cost: Cost,
) -> PathMatrix {
    let n = key_stations.len();
    let per_pair: Vec<((usize, usize), Vec<PathRecord>)> = (0..n)
        .tuple_combinations()
        .collect_vec()
        .into_par_iter()
        .map(|(i, j)| {
            let paths = enumerate_paths(graph, key_stations[i], key_stations[j], max_cost);
            ((i, j), paths)
        })
        .collect();

    let mut sets = vec![Vec::new().into_boxed_slice(); n * n];
    for ((i, j), paths) in per_pair {
        debug!(
            "{:?} <-> {:?}: {} paths within {}",
            key_stations[i],
            key_stations[j],
            paths.len(),
            max_cost
        );
        let mut reversed = paths.iter().map(PathRecord::reversed).collect_vec();
        reversed
            .sort_unstable_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.stations.cmp(&b.stations)));
        sets[i * n + j] = paths.into_boxed_slice();
        sets[j * n + i] = reversed.into_boxed_slice();
    }

    PathMatrix {
        sets: sets.into_boxed_slice(),
        num_key_points: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ExtLine;

    fn diamond() -> Graph {
        // A - B - D and A - C - D, plus a direct A - D shortcut.
        Graph::create(&[
            ExtLine {
                name: "Upper".to_string(),
                stations: vec!["A".into(), "B".into(), "D".into()],
                travel_time: 3,
            },
            ExtLine {
                name: "Lower".to_string(),
                stations: vec!["A".into(), "C".into(), "D".into()],
                travel_time: 4,
            },
            ExtLine {
                name: "Express".to_string(),
                stations: vec!["A".into(), "D".into()],
                travel_time: 10,
            },
        ])
    }

    #[test]
    fn paths_are_simple_and_costs_add_up() {
        let graph = diamond();
        let a = graph.station_idx("A").unwrap();
        let d = graph.station_idx("D").unwrap();
        let paths = enumerate_paths(&graph, a, d, 100);
        assert!(!paths.is_empty());
        for path in &paths {
            let mut seen = StationSet::new(graph.num_stations());
            for &station in path.stations() {
                assert!(seen.insert(station), "station repeated in {:?}", path);
            }
            let cost: Cost = path
                .stations()
                .windows(2)
                .map(|it| graph.edge_weight(it[0], it[1]).unwrap())
                .sum();
            assert_eq!(cost, path.cost());
        }
    }

    #[test]
    fn ceiling_prunes_expensive_paths() {
        let graph = diamond();
        let a = graph.station_idx("A").unwrap();
        let d = graph.station_idx("D").unwrap();
        assert_eq!(enumerate_paths(&graph, a, d, 100).len(), 3);
        // Only the B branch (cost 6) fits under 7.
        let tight = enumerate_paths(&graph, a, d, 7);
        assert_eq!(tight.len(), 1);
        assert_eq!(tight[0].cost(), 6);
        assert!(enumerate_paths(&graph, a, d, 5).is_empty());
    }

    #[test]
    fn results_are_cost_sorted() {
        let graph = diamond();
        let a = graph.station_idx("A").unwrap();
        let d = graph.station_idx("D").unwrap();
        let paths = enumerate_paths(&graph, a, d, 100);
        assert!(paths.windows(2).all(|it| it[0].cost() <= it[1].cost()));
    }

    #[test]
    fn extreme_weights_are_pruned_instead_of_wrapping() {
        let graph = Graph::create(&[ExtLine {
            name: "Heavy".to_string(),
            stations: vec!["A".into(), "B".into(), "C".into()],
            travel_time: Cost::MAX - 1,
        }]);
        let a = graph.station_idx("A").unwrap();
        let b = graph.station_idx("B").unwrap();
        let c = graph.station_idx("C").unwrap();
        // The two-hop total exceeds the cost type; that branch is pruned.
        assert!(enumerate_paths(&graph, a, c, Cost::MAX).is_empty());
        let one_hop = enumerate_paths(&graph, a, b, Cost::MAX);
        assert_eq!(one_hop.len(), 1);
        assert_eq!(one_hop[0].cost(), Cost::MAX - 1);
    }

    #[test]
    fn self_pair_yields_no_path() {
        let graph = diamond();
        let a = graph.station_idx("A").unwrap();
        assert!(enumerate_paths(&graph, a, a, 100).is_empty());
    }

    #[test]
    fn reverse_direction_is_derived_by_reversal() {
        let graph = diamond();
        let a = graph.station_idx("A").unwrap();
        let d = graph.station_idx("D").unwrap();
        let matrix = enumerate_key_paths(&graph, &[a, d], 100);
        let forward = matrix.between(0, 1);
        let backward = matrix.between(1, 0);
        assert_eq!(forward.len(), backward.len());
        for path in backward {
            assert_eq!(*path.stations().first().unwrap(), d);
            assert_eq!(*path.stations().last().unwrap(), a);
            assert!(forward.contains(&path.reversed()));
        }
        assert_eq!(matrix.cheapest(0, 1).unwrap().cost(), 6);
    }
}
