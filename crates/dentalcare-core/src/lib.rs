//! DentalCare Core Library
//!
//! Local-first dental practice records: patient registry, appointment
//! scheduling, treatment/prescription records, and backup/export/import
//! management over a key-value store.
//!
//! # Architecture
//!
//! ```text
//!                    Forms / Pages (out of crate)
//!                               │
//!                               ▼
//!                         DataManager ◄──────────── Reports (read-only)
//!                               │
//!                 CRUD / import / cleanup / wipe
//!                               │
//!                               ▼
//!              kv_store (SQLite, JSON arrays under fixed keys)
//!                               │
//!          ┌────────────────────┼────────────────────┐
//!          ▼                    ▼                    ▼
//!     CSV export         Backup history        Validation
//!   (date-stamped      (≤ 10 entries, most    (orphans and
//!       files)           recent first)         duplicates)
//! ```
//!
//! # Core Principle
//!
//! **The data manager is the only writer.** Every import first archives the
//! current state as a pre-import safety net, and a full wipe leaves the
//! backup history intact, so there is always a way back.
//!
//! # Modules
//!
//! - [`db`]: SQLite-backed key-value storage layer
//! - [`models`]: domain types (Patient, Appointment, Treatment, backups)
//! - [`manager`]: the data manager facade (CRUD, backup, validation)
//! - [`export`]: CSV rendering and date-stamped export files
//! - [`reports`]: search, filtering, and dashboard aggregates

pub mod db;
pub mod export;
pub mod manager;
pub mod models;
pub mod reports;

// Re-export commonly used types
pub use db::Database;
pub use export::{write_backup_file, write_csv_file, CsvExporter, CsvKind, ExportError};
pub use manager::{
    CleanupReport, DataManager, ImportOutcome, StorageStats, ValidationReport,
    BACKUP_HISTORY_CAP,
};
pub use models::{
    Appointment, AppointmentStatus, AppointmentUpdate, BackupEntry, BackupKind, DatabaseBackup,
    Medication, NewAppointment, NewPatient, NewTreatment, Patient, PatientUpdate, Treatment,
    TreatmentUpdate,
};
pub use reports::{DashboardSummary, Reports};
