use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::planner::PlanRequest;
use crate::primitives::{Cost, Satisfaction};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestDoc {
    /// Station name -> [satisfaction, extra dwell cost].
    locations: BTreeMap<String, (Satisfaction, Cost)>,
    time_limit: Cost,
    starting_point: String,
}

#[derive(Debug)]
pub enum RequestError {
    Json(serde_json::Error),
}

/// Parses the planning request:
/// `{"locations": {<station>: [satisfaction, extraCost]}, "timeLimit": <int>,
/// "startingPoint": <station>}`.
///
/// Unsigned integer typing rejects negative budgets, rewards, and dwell costs
/// at this boundary; a missing field is a deserialization error as well.
pub fn parse_request(stream: impl Read) -> Result<PlanRequest, RequestError> {
    let doc: RequestDoc = serde_json::from_reader(stream).map_err(RequestError::Json)?;
    Ok(PlanRequest {
        locations: doc
            .locations
            .into_iter()
            .map(|(name, (satisfaction, dwell_cost))| (name, satisfaction, dwell_cost))
            .collect(),
        budget: doc.time_limit,
        start: doc.starting_point,
    })
}
