use std::io::Write;

use crate::planner::PlanResult;

/// Writes the full station-by-station itinerary as CSV with columns
/// `stop,station`.
pub fn export_itinerary(result: &PlanResult, out: impl Write) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["stop", "station"])?;
    for (stop, station) in result.full_path.iter().enumerate() {
        writer.write_record([stop.to_string().as_str(), station])?;
    }
    writer.flush()?;
    Ok(())
}
