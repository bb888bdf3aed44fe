//! CSV export for energy records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::EnergyRecord;

/// Column header for CSV export.
pub const HEADER: &str = "timestamp,solar_gen_kw,wind_gen_kw,load_demand_kw,\
                          battery_soc_percent,grid_import_kw,grid_export_kw,\
                          weather,forecast,temperature,carbon_saved_kg";

/// Exports energy records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per record. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[EnergyRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes energy records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[EnergyRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        wtr.write_record(&[
            r.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            format!("{:.2}", r.solar_gen_kw),
            format!("{:.2}", r.wind_gen_kw),
            format!("{:.2}", r.load_demand_kw),
            format!("{:.1}", r.battery_soc_percent),
            format!("{:.2}", r.grid_import_kw),
            format!("{:.2}", r.grid_export_kw),
            r.weather.clone(),
            r.forecast.as_str().to_string(),
            format!("{:.1}", r.temperature),
            format!("{:.2}", r.carbon_saved_kg),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
