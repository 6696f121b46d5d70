//! Table I/O - CSV ingestion and CSV / JSON export
//!
//! CSV records are laid out as `value,label0,label1,...` with no header and
//! a varying number of labels per record.

use crate::config::{Config, OutputFormat};
use crate::error::{DataTableError, Result};
use crate::table::DataTable;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Read rows from CSV. With `merge`, rows are fed through
/// [`DataTable::inc`] so equal keys are summed; otherwise every record
/// becomes its own line.
pub fn read_csv<R: Read>(reader: R, delimiter: u8, merge: bool) -> Result<DataTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut table = DataTable::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            warn!("Skipping blank record {}", idx + 1);
            continue;
        }

        let raw_value = record.get(0).unwrap_or_default().trim();
        let value: f64 = raw_value.parse().map_err(|_| {
            DataTableError::InvalidArgument(format!(
                "Record {}: value '{}' is not a number",
                idx + 1,
                raw_value
            ))
        })?;

        let labels = record.iter().skip(1);
        if merge {
            table.inc(value, labels);
        } else {
            table.add(value, labels);
        }
    }

    Ok(table)
}

pub fn load_csv(path: &Path, config: &Config) -> Result<DataTable> {
    let file = File::open(path)?;
    let table = read_csv(file, config.delimiter, config.merge)?;
    debug!("Loaded {} lines from {}", table.len(), path.display());
    Ok(table)
}

pub fn write_csv<W: Write>(table: &DataTable, writer: W, delimiter: u8) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .delimiter(delimiter)
        .from_writer(writer);

    for line in table {
        let value = line.value().to_string();
        let labels = line.labels().iter().map(String::as_str);
        wtr.write_record(std::iter::once(value.as_str()).chain(labels))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(table: &DataTable, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}

pub fn write_table<W: Write>(table: &DataTable, writer: W, config: &Config) -> Result<()> {
    match config.format {
        OutputFormat::Csv => write_csv(table, writer, config.delimiter),
        OutputFormat::Json => write_json(table, writer),
    }
}
