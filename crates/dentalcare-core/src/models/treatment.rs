//! Treatment and prescription models.

use serde::{Deserialize, Serialize};

/// One prescribed medication line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: String,
}

/// A treatment record, optionally linked to the appointment it happened in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    /// Unique ID
    pub id: String,
    /// Referenced patient ID (not enforced by storage)
    pub patient_id: String,
    /// Patient name, denormalized at record time
    pub patient_name: String,
    /// Originating appointment ID, empty when not linked
    pub appointment_id: String,
    /// Treatment date (YYYY-MM-DD)
    pub date: String,
    /// Diagnosis text
    pub diagnosis: String,
    /// Treatment performed (free text)
    pub treatment: String,
    /// Prescribed medications, in prescription order
    pub medications: Vec<Medication>,
    /// Free-text notes
    pub notes: String,
    /// Follow-up date, empty when none planned
    pub follow_up_date: String,
    /// Cost in practice currency; non-negative by convention
    pub cost: f64,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Input for recording a treatment.
#[derive(Debug, Clone, Default)]
pub struct NewTreatment {
    pub patient_id: String,
    pub patient_name: String,
    pub appointment_id: String,
    pub date: String,
    pub diagnosis: String,
    pub treatment: String,
    pub medications: Vec<Medication>,
    pub notes: String,
    pub follow_up_date: String,
    pub cost: f64,
}

/// Partial update for a treatment; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TreatmentUpdate {
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub appointment_id: Option<String>,
    pub date: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub medications: Option<Vec<Medication>>,
    pub notes: Option<String>,
    pub follow_up_date: Option<String>,
    pub cost: Option<f64>,
}

impl Treatment {
    /// Create a new treatment record with a fresh id and timestamps.
    pub fn new(input: NewTreatment) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id: input.patient_id,
            patient_name: input.patient_name,
            appointment_id: input.appointment_id,
            date: input.date,
            diagnosis: input.diagnosis,
            treatment: input.treatment,
            medications: input.medications,
            notes: input.notes,
            follow_up_date: input.follow_up_date,
            cost: input.cost,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl TreatmentUpdate {
    /// Merge the set fields into an existing record.
    pub fn apply(self, treatment: &mut Treatment) {
        if let Some(patient_id) = self.patient_id {
            treatment.patient_id = patient_id;
        }
        if let Some(patient_name) = self.patient_name {
            treatment.patient_name = patient_name;
        }
        if let Some(appointment_id) = self.appointment_id {
            treatment.appointment_id = appointment_id;
        }
        if let Some(date) = self.date {
            treatment.date = date;
        }
        if let Some(diagnosis) = self.diagnosis {
            treatment.diagnosis = diagnosis;
        }
        if let Some(value) = self.treatment {
            treatment.treatment = value;
        }
        if let Some(medications) = self.medications {
            treatment.medications = medications;
        }
        if let Some(notes) = self.notes {
            treatment.notes = notes;
        }
        if let Some(follow_up_date) = self.follow_up_date {
            treatment.follow_up_date = follow_up_date;
        }
        if let Some(cost) = self.cost {
            treatment.cost = cost;
        }
    }
}
