//! Backup snapshot models.

use serde::{Deserialize, Serialize};

use super::{Appointment, Patient, Treatment};

/// Version string stamped into every export.
pub const BACKUP_VERSION: &str = "1.0.0";

/// A point-in-time copy of all three collections plus export metadata.
///
/// The metadata fields default on deserialization: import only requires the
/// three collection arrays, matching the export-file contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseBackup {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub treatments: Vec<Treatment>,
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub version: String,
}

/// How a history entry came to exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BackupKind {
    /// Explicit export by the user
    #[serde(rename = "manual")]
    Manual,
    /// Safety net archived automatically before an import overwrites state
    #[serde(rename = "pre-import-backup")]
    PreImportBackup,
}

/// One entry in the capped, most-recent-first backup history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupEntry {
    /// Unique ID, used for restore lookup
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BackupKind,
    /// Snapshot date (copied from the backup's export date)
    pub date: String,
    pub patient_count: usize,
    pub appointment_count: usize,
    pub treatment_count: usize,
    /// The embedded snapshot itself
    pub data: DatabaseBackup,
}

impl BackupEntry {
    /// Wrap a snapshot as a history entry.
    pub fn new(kind: BackupKind, data: DatabaseBackup) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            date: data.export_date.clone(),
            patient_count: data.patients.len(),
            appointment_count: data.appointments.len(),
            treatment_count: data.treatments.len(),
            data,
        }
    }
}
