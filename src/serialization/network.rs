use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::graph::ExtLine;
use crate::primitives::Cost;

// BTreeMap so that station indexing is independent of the document's key
// order.
#[derive(Debug, Deserialize)]
struct NetworkDoc {
    lines: BTreeMap<String, LineDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineDoc {
    stations: Vec<String>,
    travel_time: Cost,
}

#[derive(Debug)]
pub enum NetworkError {
    Json(serde_json::Error),
}

/// Parses the transit-network document:
/// `{"lines": {<name>: {"stations": [...], "travelTime": <int>}}}`.
pub fn parse_network(stream: impl Read) -> Result<Vec<ExtLine>, NetworkError> {
    let doc: NetworkDoc = serde_json::from_reader(stream).map_err(NetworkError::Json)?;
    Ok(doc
        .lines
        .into_iter()
        .map(|(name, line)| ExtLine {
            name,
            stations: line.stations,
            travel_time: line.travel_time,
        })
        .collect())
}
