//! Reading observations and writing predictions.
//!
//! Supports pretty-printing, JSON serialization, CSV append and CSV load.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::debug;

use crate::scoring::TrafficObservation;

/// Logs a record using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(record: &T) {
    debug!("{:#?}", record);
}

/// Writes a record to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize>(record: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

/// Appends a record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    append_records(path, std::slice::from_ref(record))
}

/// Appends several records, writing the header only when the file is new.
pub fn append_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Reads observations from a CSV file with the header
/// `latitude,longitude,category,severity_level,weather`.
pub fn load_observations(path: &Path) -> Result<Vec<TrafficObservation>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: TrafficObservation = result?;
        rows.push(record);
    }
    Ok(rows)
}
