//! CSV row ingestion.
//!
//! Rows have no header; the Nth column becomes `NC` in rule source, 1-based.
//! The CSV reader does the cell splitting the core expects as its input
//! contract; trimming happens once here instead of being pushed into the
//! evaluator's hot path.

use std::io::Read;

use tabrules_eval::Row;

use crate::error::{CliError, Result};

/// Reads every record from a headerless CSV document into an ordered list
/// of rows.
pub fn ingest_csv<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(CliError::Csv)?;
        rows.push(Row::from_cells(record.iter()));
    }
    Ok(rows)
}
