//! Treatment operations.

use super::DataManager;
use crate::db::DbResult;
use crate::models::{NewTreatment, Treatment, TreatmentUpdate};

impl DataManager {
    /// Record a new treatment.
    pub fn add_treatment(&self, input: NewTreatment) -> DbResult<Treatment> {
        let mut treatments = self.treatments()?;
        let treatment = Treatment::new(input);
        treatments.push(treatment.clone());
        self.save_treatments(&treatments)?;
        Ok(treatment)
    }

    /// Get a treatment by id.
    pub fn get_treatment(&self, id: &str) -> DbResult<Option<Treatment>> {
        Ok(self.treatments()?.into_iter().find(|t| t.id == id))
    }

    /// Merge a partial update into an existing treatment. Returns `Ok(None)`
    /// when the id is unknown.
    pub fn update_treatment(
        &self,
        id: &str,
        updates: TreatmentUpdate,
    ) -> DbResult<Option<Treatment>> {
        let mut treatments = self.treatments()?;
        let Some(treatment) = treatments.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        updates.apply(treatment);
        treatment.touch();
        let updated = treatment.clone();
        self.save_treatments(&treatments)?;
        Ok(Some(updated))
    }

    /// Delete a treatment. Returns whether a removal occurred.
    pub fn delete_treatment(&self, id: &str) -> DbResult<bool> {
        let mut treatments = self.treatments()?;
        let before = treatments.len();
        treatments.retain(|t| t.id != id);
        if treatments.len() == before {
            return Ok(false);
        }
        self.save_treatments(&treatments)?;
        Ok(true)
    }
}
