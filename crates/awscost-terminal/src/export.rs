//! CSV export of cost records
//!
//! Columns match the detail table: `Date`, `Service`, `Cost ($)`. The
//! header is written even when there are no records.

use awscost_core::error::{AwsCostError, Result};
use awscost_core::types::CostRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// File name offered by the dashboard download
pub const CSV_FILE_NAME: &str = "aws_cost_data.csv";
/// MIME type of the download
pub const CSV_MIME_TYPE: &str = "text/csv";

const HEADER: [&str; 3] = ["Date", "Service", "Cost ($)"];

fn export_error(e: impl std::fmt::Display) -> AwsCostError {
    AwsCostError::Export(e.to_string())
}

/// Write records as CSV to any writer
pub fn write_records_csv<W: Write>(writer: W, records: &[CostRecord]) -> Result<W> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER).map_err(export_error)?;

    for record in records {
        csv_writer
            .write_record([
                record.date.to_string(),
                record.service.to_string(),
                record.cost.to_string(),
            ])
            .map_err(export_error)?;
    }

    csv_writer.into_inner().map_err(export_error)
}

/// Render records as a CSV string
pub fn records_to_csv_string(records: &[CostRecord]) -> Result<String> {
    let bytes = write_records_csv(Vec::new(), records)?;
    String::from_utf8(bytes).map_err(export_error)
}

/// Write records to a CSV file, replacing it if present
pub fn export_records_csv(path: &Path, records: &[CostRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut file = write_records_csv(file, records)?;
    file.flush()?;
    info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}
