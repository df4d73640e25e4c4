use std::io::Write;

use serde::Serialize;

use crate::planner::PlanResult;
use crate::primitives::{Cost, Satisfaction};

#[derive(Debug, Serialize)]
struct ResponseDoc<'a> {
    key_path: &'a [String],
    full_path: &'a [String],
    satisfaction: Satisfaction,
    total_travel_time: Cost,
}

/// Writes the tour as the JSON response document:
/// `{"key_path": [...], "full_path": [...], "satisfaction": <int>,
/// "total_travel_time": <int>}`.
pub fn write_response(result: &PlanResult, out: impl Write) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(
        out,
        &ResponseDoc {
            key_path: &result.key_path,
            full_path: &result.full_path,
            satisfaction: result.satisfaction,
            total_travel_time: result.total_travel_time,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_the_wire_shape() {
        let result = PlanResult {
            key_path: vec!["A".into(), "B".into(), "A".into()],
            full_path: vec!["A".into(), "B".into(), "A".into()],
            satisfaction: 10,
            total_travel_time: 10,
        };
        let mut buffer = Vec::new();
        write_response(&result, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["key_path"][1], "B");
        assert_eq!(value["satisfaction"], 10);
        assert_eq!(value["total_travel_time"], 10);
    }
}
