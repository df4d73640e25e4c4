use std::fmt::Debug;

use itertools::Itertools;
use log::warn;

use crate::col::{map_new, HashMap};
use crate::indexer::Indexer;
use crate::primitives::Cost;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationIdx(pub u32);
impl Debug for StationIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("s#{}", self.0))
    }
}

/// A transit line as given by the network file: an ordered station list with a
/// fixed travel time per hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtLine {
    pub name: String,
    pub stations: Vec<String>,
    pub travel_time: Cost,
}

/// Undirected station graph. Adjacency is symmetric; for any unordered station
/// pair at most one edge exists, carrying the minimum travel time over all
/// lines serving that pair.
#[derive(Debug)]
pub struct Graph {
    adjacency: Box<[Vec<(StationIdx, Cost)>]>,
    station_names: Box<[String]>,
    idx_by_name: HashMap<String, StationIdx>,
}

impl Graph {
    pub fn create(lines: &[ExtLine]) -> Graph {
        let mut indexer: Indexer<String, StationIdx> = Indexer::new(|it| StationIdx(it as u32));
        let mut weights: HashMap<(StationIdx, StationIdx), Cost> = map_new();

        for line in lines {
            let stops = line
                .stations
                .iter()
                .map(|it| indexer.index(it.clone()))
                .collect_vec();
            if stops.len() < 2 {
                warn!("Line {} has fewer than two stations", line.name);
            }
            for (&a, &b) in stops.iter().tuple_windows() {
                if a == b {
                    warn!("Line {} stops twice in a row at {:?}", line.name, a);
                    continue;
                }
                let key = if a < b { (a, b) } else { (b, a) };
                weights
                    .entry(key)
                    .and_modify(|w| *w = (*w).min(line.travel_time))
                    .or_insert(line.travel_time);
            }
        }

        let (station_names, idx_by_name) = indexer.into_parts();
        let mut adjacency = vec![Vec::new(); station_names.len()];
        for (&(a, b), &weight) in weights.iter() {
            adjacency[a.0 as usize].push((b, weight));
            adjacency[b.0 as usize].push((a, weight));
        }
        for neighbors in adjacency.iter_mut() {
            neighbors.sort_unstable();
        }

        Graph {
            adjacency: adjacency.into_boxed_slice(),
            station_names,
            idx_by_name,
        }
    }

    pub fn num_stations(&self) -> usize {
        self.station_names.len()
    }

    pub fn neighbors(&self, station: StationIdx) -> &[(StationIdx, Cost)] {
        &self.adjacency[station.0 as usize]
    }

    pub fn station_idx(&self, name: &str) -> Option<StationIdx> {
        self.idx_by_name.get(name).copied()
    }

    pub fn station_name(&self, station: StationIdx) -> &str {
        &self.station_names[station.0 as usize]
    }

    pub fn edge_weight(&self, from: StationIdx, to: StationIdx) -> Option<Cost> {
        self.neighbors(from)
            .iter()
            .find(|(it, _)| *it == to)
            .map(|(_, weight)| *weight)
    }
}
