//! Validation, orphan cleanup, storage statistics, and full wipe.

use std::collections::HashSet;

use super::DataManager;
use crate::db::{keys, DbResult};

/// Outcome of a referential-integrity scan. Purely informational; nothing is
/// modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Appointments whose patient no longer exists
    pub orphaned_appointments: usize,
    /// Treatments whose patient no longer exists
    pub orphaned_treatments: usize,
    /// Patients whose email or phone was already seen earlier in the
    /// collection (first occurrences are never counted)
    pub duplicate_patients: usize,
}

/// Outcome of an orphan cleanup pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    /// Total records removed across both dependent collections
    pub cleaned: usize,
}

/// Storage usage summary for the data-management panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    pub total_patients: usize,
    pub total_appointments: usize,
    pub total_treatments: usize,
    /// Serialized size of the three collections (history excluded),
    /// formatted as kilobytes with two decimals
    pub storage_used: String,
    /// Date of the most recent backup, `None` when history is empty
    pub last_backup: Option<String>,
}

impl DataManager {
    /// Scan for orphaned references and duplicate patient contacts.
    pub fn validate(&self) -> DbResult<ValidationReport> {
        let patients = self.patients()?;
        let appointments = self.appointments()?;
        let treatments = self.treatments()?;

        let patient_ids: HashSet<&str> = patients.iter().map(|p| p.id.as_str()).collect();
        let orphaned_appointments = appointments
            .iter()
            .filter(|a| !patient_ids.contains(a.patient_id.as_str()))
            .count();
        let orphaned_treatments = treatments
            .iter()
            .filter(|t| !patient_ids.contains(t.patient_id.as_str()))
            .count();

        let mut emails = HashSet::new();
        let mut phones = HashSet::new();
        let mut duplicate_patients = 0;
        for patient in &patients {
            if emails.contains(patient.email.as_str()) || phones.contains(patient.phone.as_str()) {
                duplicate_patients += 1;
            }
            emails.insert(patient.email.as_str());
            phones.insert(patient.phone.as_str());
        }

        Ok(ValidationReport {
            orphaned_appointments,
            orphaned_treatments,
            duplicate_patients,
        })
    }

    /// Remove appointments and treatments whose patient no longer exists.
    pub fn cleanup(&self) -> DbResult<CleanupReport> {
        let patients = self.patients()?;
        let mut appointments = self.appointments()?;
        let mut treatments = self.treatments()?;

        let patient_ids: HashSet<&str> = patients.iter().map(|p| p.id.as_str()).collect();

        let before = appointments.len() + treatments.len();
        appointments.retain(|a| patient_ids.contains(a.patient_id.as_str()));
        treatments.retain(|t| patient_ids.contains(t.patient_id.as_str()));
        let cleaned = before - appointments.len() - treatments.len();

        self.save_appointments(&appointments)?;
        self.save_treatments(&treatments)?;

        Ok(CleanupReport { cleaned })
    }

    /// Collection counts, serialized data size, and last backup date.
    pub fn storage_stats(&self) -> DbResult<StorageStats> {
        let patients = self.patients()?;
        let appointments = self.appointments()?;
        let treatments = self.treatments()?;
        let history = self.backup_history()?;

        let data_size = serde_json::to_string(&serde_json::json!({
            "patients": patients,
            "appointments": appointments,
            "treatments": treatments,
        }))?
        .len();

        Ok(StorageStats {
            total_patients: patients.len(),
            total_appointments: appointments.len(),
            total_treatments: treatments.len(),
            storage_used: format!("{:.2} KB", data_size as f64 / 1024.0),
            last_backup: history.first().map(|entry| entry.date.clone()),
        })
    }

    /// Remove the three entity collections outright. Backup history is
    /// deliberately kept: restoring from it is the only way back after an
    /// accidental wipe.
    pub fn clear_all(&self) -> DbResult<()> {
        self.db().remove(keys::PATIENTS)?;
        self.db().remove(keys::APPOINTMENTS)?;
        self.db().remove(keys::TREATMENTS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, NewAppointment, NewPatient, NewTreatment};

    fn manager() -> DataManager {
        DataManager::open_in_memory().unwrap()
    }

    fn add_patient(manager: &DataManager, name: &str, email: &str, phone: &str) -> String {
        manager
            .add_patient(NewPatient {
                name: name.into(),
                email: email.into(),
                phone: phone.into(),
                ..Default::default()
            })
            .unwrap()
            .id
    }

    fn add_appointment(manager: &DataManager, patient_id: &str) {
        manager
            .add_appointment(NewAppointment {
                patient_id: patient_id.into(),
                patient_name: String::new(),
                date: "2026-09-01".into(),
                time: "09:00".into(),
                status: AppointmentStatus::Scheduled,
                kind: "Checkup".into(),
                notes: String::new(),
                duration_minutes: 30,
            })
            .unwrap();
    }

    fn add_treatment(manager: &DataManager, patient_id: &str) {
        manager
            .add_treatment(NewTreatment {
                patient_id: patient_id.into(),
                cost: 100.0,
                ..Default::default()
            })
            .unwrap();
    }

    #[test]
    fn test_validate_counts_orphans() {
        let manager = manager();
        add_patient(&manager, "A", "a@example.com", "1");
        add_patient(&manager, "B", "b@example.com", "2");
        add_appointment(&manager, "ghost");
        add_treatment(&manager, "ghost");

        let report = manager.validate().unwrap();
        assert_eq!(report.orphaned_appointments, 1);
        assert_eq!(report.orphaned_treatments, 1);
        assert_eq!(report.duplicate_patients, 0);
    }

    #[test]
    fn test_duplicates_count_only_repeats() {
        let manager = manager();
        // Three patients sharing one email count as 2, not 3.
        add_patient(&manager, "A", "shared@example.com", "1");
        add_patient(&manager, "B", "shared@example.com", "2");
        add_patient(&manager, "C", "shared@example.com", "3");
        // Phone collision counts too.
        add_patient(&manager, "D", "d@example.com", "1");

        let report = manager.validate().unwrap();
        assert_eq!(report.duplicate_patients, 3);
    }

    #[test]
    fn test_cleanup_removes_orphans() {
        let manager = manager();
        let id = add_patient(&manager, "A", "a@example.com", "1");
        add_appointment(&manager, &id);
        add_appointment(&manager, "ghost");
        add_treatment(&manager, "ghost");

        let report = manager.cleanup().unwrap();
        assert_eq!(report.cleaned, 2);

        let after = manager.validate().unwrap();
        assert_eq!(after.orphaned_appointments, 0);
        assert_eq!(after.orphaned_treatments, 0);
        assert_eq!(manager.appointments().unwrap().len(), 1);
    }

    #[test]
    fn test_storage_stats() {
        let manager = manager();
        add_patient(&manager, "A", "a@example.com", "1");

        let stats = manager.storage_stats().unwrap();
        assert_eq!(stats.total_patients, 1);
        assert_eq!(stats.total_appointments, 0);
        assert!(stats.storage_used.ends_with(" KB"));
        assert!(stats.last_backup.is_none());

        manager.export_snapshot().unwrap();
        let stats = manager.storage_stats().unwrap();
        assert!(stats.last_backup.is_some());
    }

    #[test]
    fn test_clear_all_keeps_history() {
        let manager = manager();
        add_patient(&manager, "A", "a@example.com", "1");
        manager.export_snapshot().unwrap();

        manager.clear_all().unwrap();
        assert!(manager.patients().unwrap().is_empty());
        assert!(manager.appointments().unwrap().is_empty());
        assert!(manager.treatments().unwrap().is_empty());
        assert_eq!(manager.backup_history().unwrap().len(), 1);
    }
}
