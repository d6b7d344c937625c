//! The data manager facade.
//!
//! A [`DataManager`] is constructed once per session, owns the storage
//! handle, and is the only writer to the persisted collections. Callers pass
//! it explicitly; there is no global instance.

mod appointments;
mod backup;
mod maintenance;
mod patients;
mod treatments;

pub use backup::{ImportOutcome, BACKUP_HISTORY_CAP};
pub use maintenance::{CleanupReport, StorageStats, ValidationReport};

use std::path::Path;

use crate::db::{keys, Database, DbResult};
use crate::models::{Appointment, Patient, Treatment};

/// Facade over the persisted collections: CRUD, backup/restore, validation,
/// cleanup, and storage statistics.
pub struct DataManager {
    db: Database,
}

impl DataManager {
    /// Wrap an already-open database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the database at `path`, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    /// In-memory manager (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    pub(crate) fn db(&self) -> &Database {
        &self.db
    }

    /// All stored patients, in insertion order.
    pub fn patients(&self) -> DbResult<Vec<Patient>> {
        self.db.read_collection(keys::PATIENTS)
    }

    /// All stored appointments, in insertion order.
    pub fn appointments(&self) -> DbResult<Vec<Appointment>> {
        self.db.read_collection(keys::APPOINTMENTS)
    }

    /// All stored treatments, in insertion order.
    pub fn treatments(&self) -> DbResult<Vec<Treatment>> {
        self.db.read_collection(keys::TREATMENTS)
    }

    pub(crate) fn save_patients(&self, patients: &[Patient]) -> DbResult<()> {
        self.db.write_collection(keys::PATIENTS, patients)
    }

    pub(crate) fn save_appointments(&self, appointments: &[Appointment]) -> DbResult<()> {
        self.db.write_collection(keys::APPOINTMENTS, appointments)
    }

    pub(crate) fn save_treatments(&self, treatments: &[Treatment]) -> DbResult<()> {
        self.db.write_collection(keys::TREATMENTS, treatments)
    }
}
