//! CSV output for scraped rows.

use crate::model::OutputRow;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to write output: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Write `rows` as CSV to `path`: one header line, then one line per row.
///
/// Columns follow the field order of [OutputRow]. An empty slice writes nothing and leaves any
/// existing file untouched. Returns the number of rows written.
pub fn write_csv(rows: &[OutputRow], path: &Path) -> Result<usize, TableError> {
    if rows.is_empty() {
        return Ok(0);
    }
    let f = File::create(path).map_err(|e| TableError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = csv::Writer::from_writer(f);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| TableError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}
