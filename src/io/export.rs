//! CSV export for per-tick monitoring snapshots.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::monitor::TickSnapshot;

/// Schema v1 column header for CSV telemetry export.
const HEADER: &str = "tick,elapsed_s,total_current_a,total_power_w,\
                      energy_kwh,cost,over_limit,alert_count,shed_count";

/// Exports a monitoring run to a CSV file at the given path.
///
/// Writes a header row followed by one data row per tick using the
/// schema v1 column layout. Produces deterministic output for identical
/// inputs.
///
/// # Arguments
///
/// * `snapshots` - Complete per-tick run results
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(snapshots: &[TickSnapshot], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(snapshots, buf)
}

/// Writes a monitoring run as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(snapshots: &[TickSnapshot], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for s in snapshots {
        wtr.write_record(&[
            s.tick.to_string(),
            format!("{:.3}", s.elapsed_s),
            format!("{:.3}", s.total_current_a),
            format!("{:.1}", s.total_power_w),
            format!("{:.6}", s.session_energy_kwh),
            format!("{:.4}", s.session_cost),
            s.over_limit.to_string(),
            s.alert_count.to_string(),
            s.shed_count.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
