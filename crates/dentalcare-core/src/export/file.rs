//! Date-stamped export files, the library-side port of the browser download.

use std::fs;
use std::path::{Path, PathBuf};

use super::{CsvExporter, CsvKind, ExportResult};
use crate::manager::DataManager;

fn date_stamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Write a full backup to `dentalcare-backup-YYYY-MM-DD.json` in `dir` and
/// return its path. As with any export, the snapshot is also archived in the
/// backup history.
pub fn write_backup_file(manager: &DataManager, dir: &Path) -> ExportResult<PathBuf> {
    let backup = manager.export_snapshot()?;
    let path = dir.join(format!("dentalcare-backup-{}.json", date_stamp()));
    fs::write(&path, serde_json::to_string_pretty(&backup)?)?;
    Ok(path)
}

/// Write one collection to `dentalcare-<kind>-YYYY-MM-DD.csv` in `dir` and
/// return its path. Nothing is written when the collection is empty.
pub fn write_csv_file(manager: &DataManager, kind: CsvKind, dir: &Path) -> ExportResult<PathBuf> {
    let csv = CsvExporter::new(manager).render(kind)?;
    let path = dir.join(format!("dentalcare-{}-{}.csv", kind, date_stamp()));
    fs::write(&path, csv)?;
    Ok(path)
}
