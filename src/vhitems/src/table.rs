//! CSV output for exported records

use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A record type with a fixed column layout
///
/// `COLUMNS` must list the serialized field names in declaration order.
pub trait Row: Serialize {
    const COLUMNS: &'static [&'static str];
}

/// Write records to a CSV file, header first
///
/// The header is written even when there are no records. Returns the
/// absolute path of the written file.
pub fn write_table<T: Row>(path: &Path, records: &[T]) -> Result<PathBuf> {
    let write_err = |source: csv::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| write_err(e.into()))?;
    write_rows(file, records).map_err(write_err)?;

    std::fs::canonicalize(path).map_err(|e| write_err(e.into()))
}

/// Serialize records as CSV into any writer
pub fn write_rows<W: std::io::Write, T: Row>(
    writer: W,
    records: &[T],
) -> std::result::Result<(), csv::Error> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(T::COLUMNS)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;

    Ok(())
}
