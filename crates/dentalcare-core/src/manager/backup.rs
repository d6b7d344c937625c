//! Backup, export, import, and restore.

use std::fs;
use std::path::Path;

use super::DataManager;
use crate::db::{keys, DbResult};
use crate::models::{BackupEntry, BackupKind, DatabaseBackup, BACKUP_VERSION};

/// Most backups retained in history; older entries are silently evicted.
pub const BACKUP_HISTORY_CAP: usize = 10;

/// Result of an import or restore attempt. Failures are data, not panics:
/// callers surface the message as a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
}

impl ImportOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl DataManager {
    /// Snapshot all three collections without touching history.
    fn snapshot(&self) -> DbResult<DatabaseBackup> {
        Ok(DatabaseBackup {
            patients: self.patients()?,
            appointments: self.appointments()?,
            treatments: self.treatments()?,
            export_date: chrono::Utc::now().to_rfc3339(),
            version: BACKUP_VERSION.to_string(),
        })
    }

    /// Export the full database. Not side-effect-free: every export also
    /// archives itself as a manual entry in the backup history.
    pub fn export_snapshot(&self) -> DbResult<DatabaseBackup> {
        let backup = self.snapshot()?;
        self.push_backup(&backup, BackupKind::Manual)?;
        Ok(backup)
    }

    /// Backup history, most recent first, at most [`BACKUP_HISTORY_CAP`]
    /// entries.
    pub fn backup_history(&self) -> DbResult<Vec<BackupEntry>> {
        self.db().read_collection(keys::BACKUP_HISTORY)
    }

    fn push_backup(&self, backup: &DatabaseBackup, kind: BackupKind) -> DbResult<()> {
        let mut history = self.backup_history()?;
        history.insert(0, BackupEntry::new(kind, backup.clone()));
        history.truncate(BACKUP_HISTORY_CAP);
        self.db().write_collection(keys::BACKUP_HISTORY, &history)
    }

    /// Replace all three collections with the backup's contents. The current
    /// state is archived in history first as a pre-import safety net, so a
    /// bad import can always be undone via [`DataManager::restore_from_backup`].
    pub fn import_backup(&self, backup: &DatabaseBackup) -> ImportOutcome {
        match self.import_backup_inner(backup) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "import failed");
                ImportOutcome::failure("Failed to import data. Please check the file format.")
            }
        }
    }

    fn import_backup_inner(&self, backup: &DatabaseBackup) -> DbResult<ImportOutcome> {
        let current = self.snapshot()?;
        self.push_backup(&current, BackupKind::PreImportBackup)?;

        self.save_patients(&backup.patients)?;
        self.save_appointments(&backup.appointments)?;
        self.save_treatments(&backup.treatments)?;

        Ok(ImportOutcome {
            success: true,
            message: format!(
                "Successfully imported {} patients, {} appointments, and {} treatments",
                backup.patients.len(),
                backup.appointments.len(),
                backup.treatments.len()
            ),
        })
    }

    /// Import from raw JSON text in the export-file format. The payload must
    /// carry all three collection arrays; otherwise nothing is written.
    pub fn import_json(&self, text: &str) -> ImportOutcome {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "import payload is not JSON");
                return ImportOutcome::failure("Invalid JSON file format");
            }
        };

        let complete = ["patients", "appointments", "treatments"]
            .iter()
            .all(|field| value.get(field).is_some_and(|v| v.is_array()));
        if !complete {
            return ImportOutcome::failure("Invalid backup file structure");
        }

        match serde_json::from_value::<DatabaseBackup>(value) {
            Ok(backup) => self.import_backup(&backup),
            Err(e) => {
                tracing::warn!(error = %e, "import payload has malformed records");
                ImportOutcome::failure("Failed to import data. Please check the file format.")
            }
        }
    }

    /// Import a backup file from disk.
    pub fn import_from_file(&self, path: &Path) -> ImportOutcome {
        match fs::read_to_string(path) {
            Ok(text) => self.import_json(&text),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read import file");
                ImportOutcome::failure("Failed to read file")
            }
        }
    }

    /// Restore a history entry by id. Restoring is importing the embedded
    /// snapshot, so it archives its own pre-import entry first.
    pub fn restore_from_backup(&self, backup_id: &str) -> ImportOutcome {
        let history = match self.backup_history() {
            Ok(history) => history,
            Err(e) => {
                tracing::error!(error = %e, "could not load backup history");
                return ImportOutcome::failure("Failed to import data. Please check the file format.");
            }
        };

        match history.into_iter().find(|entry| entry.id == backup_id) {
            Some(entry) => self.import_backup(&entry.data),
            None => ImportOutcome::failure("Backup not found"),
        }
    }
}
