//! Appointment operations.

use super::DataManager;
use crate::db::DbResult;
use crate::models::{Appointment, AppointmentUpdate, NewAppointment};

impl DataManager {
    /// Schedule a new appointment. The referenced patient is not checked;
    /// dangling references surface through [`DataManager::validate`].
    pub fn add_appointment(&self, input: NewAppointment) -> DbResult<Appointment> {
        let mut appointments = self.appointments()?;
        let appointment = Appointment::new(input);
        appointments.push(appointment.clone());
        self.save_appointments(&appointments)?;
        Ok(appointment)
    }

    /// Get an appointment by id.
    pub fn get_appointment(&self, id: &str) -> DbResult<Option<Appointment>> {
        Ok(self.appointments()?.into_iter().find(|a| a.id == id))
    }

    /// Merge a partial update into an existing appointment. Returns
    /// `Ok(None)` when the id is unknown.
    pub fn update_appointment(
        &self,
        id: &str,
        updates: AppointmentUpdate,
    ) -> DbResult<Option<Appointment>> {
        let mut appointments = self.appointments()?;
        let Some(appointment) = appointments.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        updates.apply(appointment);
        appointment.touch();
        let updated = appointment.clone();
        self.save_appointments(&appointments)?;
        Ok(Some(updated))
    }

    /// Delete an appointment. Returns whether a removal occurred.
    pub fn delete_appointment(&self, id: &str) -> DbResult<bool> {
        let mut appointments = self.appointments()?;
        let before = appointments.len();
        appointments.retain(|a| a.id != id);
        if appointments.len() == before {
            return Ok(false);
        }
        self.save_appointments(&appointments)?;
        Ok(true)
    }
}
