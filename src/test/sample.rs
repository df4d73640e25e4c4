use crate::graph::ExtLine;

fn line(name: &str, stations: &[&str], travel_time: u64) -> ExtLine {
    ExtLine {
        name: name.to_string(),
        stations: stations.iter().map(|it| it.to_string()).collect(),
        travel_time,
    }
}

/// The three-station line used throughout the examples: A - B - C, 5 per hop.
pub fn abc_line() -> Vec<ExtLine> {
    vec![line("Main", &["A", "B", "C"], 5)]
}

/// A small city: a hub with three branches forming a cycle, plus a ferry line
/// disconnected from everything else.
pub fn sample_network() -> Vec<ExtLine> {
    vec![
        line("Red", &["Central", "Museum", "Park"], 4),
        line("Blue", &["Central", "Harbor"], 6),
        line("Green", &["Park", "Harbor"], 3),
        line("Ferry", &["Island1", "Island2"], 2),
    ]
}
