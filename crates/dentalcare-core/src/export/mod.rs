//! CSV rendering and export files.

mod csv;
mod file;

pub use csv::{CsvExporter, CsvKind};
pub use file::{write_backup_file, write_csv_file};

use thiserror::Error;

use crate::db::DbError;

/// Export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The collection is empty; no file should be produced.
    #[error("No {0} data to export")]
    NothingToExport(CsvKind),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
