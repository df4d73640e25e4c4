use itertools::Itertools;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::graph::ExtLine;
use crate::planner::{build_graph, plan, PlanRequest};

pub fn run_samples() {
    for seed in 0..10 {
        run(seed);
    }
}

/// Plans tours on a seeded random network across an ascending budget ladder
/// and checks the result invariants: determinism of repeated runs and
/// satisfaction monotone in the budget.
pub fn run(seed: u64) {
    let num_stations = 12;
    let num_lines = 4;
    let stations_per_line = 2..6;
    let travel_time_range = 1..10;
    let num_key_points = 5;
    let satisfaction_range = 1..20;
    let dwell_range = 0..4;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let names = (0..num_stations).map(|it| format!("S{}", it)).collect_vec();

    let lines = (0..num_lines)
        .map(|line| {
            let num_stops = rng.gen_range(stations_per_line.clone());
            ExtLine {
                name: format!("L{}", line),
                stations: (0..num_stops)
                    .map(|_| names[rng.gen_range(0..num_stations)].clone())
                    .collect(),
                travel_time: rng.gen_range(travel_time_range.clone()),
            }
        })
        .collect_vec();
    let graph = build_graph(&lines);

    let served = lines
        .iter()
        .flat_map(|it| it.stations.iter())
        .unique()
        .sorted()
        .collect_vec();
    let start = served[0].clone();
    let locations = served
        .iter()
        .skip(1)
        .take(num_key_points)
        .map(|name| {
            (
                (*name).clone(),
                rng.gen_range(satisfaction_range.clone()),
                rng.gen_range(dwell_range.clone()),
            )
        })
        .collect_vec();

    let mut last_satisfaction = 0;
    for budget in [0, 5, 10, 20, 40, 80] {
        let request = PlanRequest {
            locations: locations.clone(),
            budget,
            start: start.clone(),
        };
        let result = plan(&graph, &request).expect("random instance should be plannable");
        let again = plan(&graph, &request).expect("random instance should be plannable");
        assert_eq!(result, again, "seed {} budget {} is not deterministic", seed, budget);
        assert!(
            result.satisfaction >= last_satisfaction,
            "seed {}: satisfaction dropped from {} to {} at budget {}",
            seed,
            last_satisfaction,
            result.satisfaction,
            budget
        );
        last_satisfaction = result.satisfaction;
        info!(
            "seed {} budget {}: satisfaction {}, travel time {}, {} stops",
            seed,
            budget,
            result.satisfaction,
            result.total_travel_time,
            result.full_path.len()
        );
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn random_instances_hold_the_invariants() {
        for seed in 0..5 {
            super::run(seed);
        }
    }
}
