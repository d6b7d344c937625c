//! Appointment models.

use serde::{Deserialize, Serialize};

/// Appointment status. Transitions are caller-driven; the storage layer does
/// not forbid leaving a terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// A scheduled appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique ID
    pub id: String,
    /// Referenced patient ID (not enforced by storage)
    pub patient_id: String,
    /// Patient name, denormalized at scheduling time
    pub patient_name: String,
    /// Appointment date (YYYY-MM-DD)
    pub date: String,
    /// Appointment time (HH:MM)
    pub time: String,
    /// Current status
    pub status: AppointmentStatus,
    /// Appointment type, e.g. "Cleaning" or "Root Canal"
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-text notes
    pub notes: String,
    /// Expected duration in minutes
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Input for scheduling an appointment.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: String,
    pub patient_name: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub kind: String,
    pub notes: String,
    pub duration_minutes: u32,
}

/// Partial update for an appointment; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct AppointmentUpdate {
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub kind: Option<String>,
    pub notes: Option<String>,
    pub duration_minutes: Option<u32>,
}

impl Appointment {
    /// Create a new appointment record with a fresh id and timestamps.
    pub fn new(input: NewAppointment) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id: input.patient_id,
            patient_name: input.patient_name,
            date: input.date,
            time: input.time,
            status: input.status,
            kind: input.kind,
            notes: input.notes,
            duration_minutes: input.duration_minutes,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl AppointmentUpdate {
    /// Merge the set fields into an existing record.
    pub fn apply(self, appointment: &mut Appointment) {
        if let Some(patient_id) = self.patient_id {
            appointment.patient_id = patient_id;
        }
        if let Some(patient_name) = self.patient_name {
            appointment.patient_name = patient_name;
        }
        if let Some(date) = self.date {
            appointment.date = date;
        }
        if let Some(time) = self.time {
            appointment.time = time;
        }
        if let Some(status) = self.status {
            appointment.status = status;
        }
        if let Some(kind) = self.kind {
            appointment.kind = kind;
        }
        if let Some(notes) = self.notes {
            appointment.notes = notes;
        }
        if let Some(duration_minutes) = self.duration_minutes {
            appointment.duration_minutes = duration_minutes;
        }
    }
}
