//! Patient operations.

use super::DataManager;
use crate::db::DbResult;
use crate::models::{NewPatient, Patient, PatientUpdate};

impl DataManager {
    /// Register a new patient. No uniqueness is enforced; duplicate emails
    /// or phones are only flagged later by [`DataManager::validate`].
    pub fn add_patient(&self, input: NewPatient) -> DbResult<Patient> {
        let mut patients = self.patients()?;
        let patient = Patient::new(input);
        patients.push(patient.clone());
        self.save_patients(&patients)?;
        Ok(patient)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        Ok(self.patients()?.into_iter().find(|p| p.id == id))
    }

    /// Merge a partial update into an existing patient. Returns `Ok(None)`
    /// when the id is unknown.
    pub fn update_patient(&self, id: &str, updates: PatientUpdate) -> DbResult<Option<Patient>> {
        let mut patients = self.patients()?;
        let Some(patient) = patients.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        updates.apply(patient);
        patient.touch();
        let updated = patient.clone();
        self.save_patients(&patients)?;
        Ok(Some(updated))
    }

    /// Delete a patient. Cascades to the patient's appointments and
    /// treatments. Returns whether a removal occurred.
    pub fn delete_patient(&self, id: &str) -> DbResult<bool> {
        let mut patients = self.patients()?;
        let before = patients.len();
        patients.retain(|p| p.id != id);
        if patients.len() == before {
            return Ok(false);
        }
        self.save_patients(&patients)?;
        self.delete_patient_related(id)?;
        Ok(true)
    }

    fn delete_patient_related(&self, patient_id: &str) -> DbResult<()> {
        let mut appointments = self.appointments()?;
        appointments.retain(|a| a.patient_id != patient_id);
        self.save_appointments(&appointments)?;

        let mut treatments = self.treatments()?;
        treatments.retain(|t| t.patient_id != patient_id);
        self.save_treatments(&treatments)?;
        Ok(())
    }
}
