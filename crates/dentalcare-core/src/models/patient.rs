//! Patient models.

use serde::{Deserialize, Serialize};

/// A registered patient.
///
/// Field names serialize in camelCase so export files stay compatible with
/// the app's existing backups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique ID, generated at registration
    pub id: String,
    /// Full name
    pub name: String,
    /// Contact phone number
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: String,
    /// Postal address
    pub address: String,
    /// Free-text medical history
    pub medical_history: String,
    /// Known allergies (free text, empty when none)
    pub allergies: String,
    /// Emergency contact name
    pub emergency_contact: String,
    /// Emergency contact phone
    pub emergency_phone: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Input for registering a patient: a [`Patient`] minus the generated fields.
#[derive(Debug, Clone, Default)]
pub struct NewPatient {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date_of_birth: String,
    pub address: String,
    pub medical_history: String,
    pub allergies: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
}

/// Partial update for a patient; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
}

impl Patient {
    /// Create a new patient record with a fresh id and timestamps.
    pub fn new(input: NewPatient) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name,
            phone: input.phone,
            email: input.email,
            date_of_birth: input.date_of_birth,
            address: input.address,
            medical_history: input.medical_history,
            allergies: input.allergies,
            emergency_contact: input.emergency_contact,
            emergency_phone: input.emergency_phone,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl PatientUpdate {
    /// Merge the set fields into an existing record.
    pub fn apply(self, patient: &mut Patient) {
        if let Some(name) = self.name {
            patient.name = name;
        }
        if let Some(phone) = self.phone {
            patient.phone = phone;
        }
        if let Some(email) = self.email {
            patient.email = email;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            patient.date_of_birth = date_of_birth;
        }
        if let Some(address) = self.address {
            patient.address = address;
        }
        if let Some(medical_history) = self.medical_history {
            patient.medical_history = medical_history;
        }
        if let Some(allergies) = self.allergies {
            patient.allergies = allergies;
        }
        if let Some(emergency_contact) = self.emergency_contact {
            patient.emergency_contact = emergency_contact;
        }
        if let Some(emergency_phone) = self.emergency_phone {
            patient.emergency_phone = emergency_phone;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient() {
        let patient = Patient::new(NewPatient {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            ..Default::default()
        });
        assert_eq!(patient.name, "Jane Doe");
        assert_eq!(patient.created_at, patient.updated_at);
        assert_eq!(patient.id.len(), 36); // UUID format
    }

    #[test]
    fn test_update_merges_only_set_fields() {
        let mut patient = Patient::new(NewPatient {
            name: "Jane Doe".into(),
            phone: "555-0100".into(),
            ..Default::default()
        });

        PatientUpdate {
            phone: Some("555-0199".into()),
            ..Default::default()
        }
        .apply(&mut patient);

        assert_eq!(patient.phone, "555-0199");
        assert_eq!(patient.name, "Jane Doe");
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let patient = Patient::new(NewPatient::default());
        let json = serde_json::to_string(&patient).unwrap();
        assert!(json.contains("\"dateOfBirth\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"emergencyContact\""));
    }
}
