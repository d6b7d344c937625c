//! CSV rendering for the entity collections.
//!
//! The header row is the key set of the first record (struct declaration
//! order). Cells containing a comma or double-quote are wrapped in quotes
//! with internal quotes doubled; null, false, zero, and empty values all
//! degrade to the empty cell.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::{ExportError, ExportResult};
use crate::manager::DataManager;
use crate::models::Treatment;

/// Which collection to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvKind {
    Patients,
    Appointments,
    Treatments,
}

impl CsvKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CsvKind::Patients => "patients",
            CsvKind::Appointments => "appointments",
            CsvKind::Treatments => "treatments",
        }
    }
}

impl fmt::Display for CsvKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSV exporter over a data manager.
pub struct CsvExporter<'a> {
    manager: &'a DataManager,
}

impl<'a> CsvExporter<'a> {
    /// Create a new CSV exporter.
    pub fn new(manager: &'a DataManager) -> Self {
        Self { manager }
    }

    /// Render one collection as CSV. An empty collection is an error so
    /// callers surface "nothing to export" instead of writing a blank file.
    pub fn render(&self, kind: CsvKind) -> ExportResult<String> {
        let rows = match kind {
            CsvKind::Patients => value_rows(&self.manager.patients()?)?,
            CsvKind::Appointments => value_rows(&self.manager.appointments()?)?,
            CsvKind::Treatments => treatment_rows(&self.manager.treatments()?)?,
        };
        if rows.is_empty() {
            return Err(ExportError::NothingToExport(kind));
        }
        Ok(render_rows(&rows))
    }
}

fn value_rows<T: Serialize>(records: &[T]) -> ExportResult<Vec<Value>> {
    records
        .iter()
        .map(|record| serde_json::to_value(record).map_err(Into::into))
        .collect()
}

/// Treatments flatten the medication list into one human-readable cell;
/// the structured fields are lost in this export path by design.
fn treatment_rows(treatments: &[Treatment]) -> ExportResult<Vec<Value>> {
    treatments
        .iter()
        .map(|treatment| {
            let mut row = serde_json::to_value(treatment)?;
            let flattened = treatment
                .medications
                .iter()
                .map(|m| format!("{} ({})", m.name, m.dosage))
                .collect::<Vec<_>>()
                .join("; ");
            row["medications"] = Value::String(flattened);
            Ok(row)
        })
        .collect()
}

fn render_rows(rows: &[Value]) -> String {
    let headers: Vec<&str> = match rows.first().and_then(Value::as_object) {
        Some(first) => first.keys().map(String::as_str).collect(),
        None => return String::new(),
    };

    let mut csv = String::new();
    csv.push_str(&headers.join(","));
    csv.push('\n');

    for row in rows {
        let line = headers
            .iter()
            .map(|header| cell_text(row.get(*header).unwrap_or(&Value::Null)))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => {
            if *b {
                "true".to_string()
            } else {
                String::new()
            }
        }
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                String::new()
            } else {
                n.to_string()
            }
        }
        Value::String(s) => escape_csv(s),
        other => escape_csv(&other.to_string()),
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Medication, NewPatient, NewTreatment};
    use proptest::prelude::*;

    fn manager() -> DataManager {
        DataManager::open_in_memory().unwrap()
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_falsy_cells_are_empty() {
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&Value::Bool(false)), "");
        assert_eq!(cell_text(&serde_json::json!(0)), "");
        assert_eq!(cell_text(&serde_json::json!(0.0)), "");
        assert_eq!(cell_text(&serde_json::json!("")), "");
        assert_eq!(cell_text(&serde_json::json!(30)), "30");
    }

    #[test]
    fn test_empty_collection_is_an_error() {
        let manager = manager();
        let result = CsvExporter::new(&manager).render(CsvKind::Patients);
        assert!(matches!(
            result,
            Err(ExportError::NothingToExport(CsvKind::Patients))
        ));
    }

    #[test]
    fn test_patient_csv_layout() {
        let manager = manager();
        manager
            .add_patient(NewPatient {
                name: "Doe, Jane".into(),
                email: "jane@example.com".into(),
                ..Default::default()
            })
            .unwrap();

        let csv = CsvExporter::new(&manager).render(CsvKind::Patients).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2); // Header + 1 record
        assert!(lines[0].starts_with("id,name,phone,email"));
        assert!(lines[1].contains("\"Doe, Jane\""));
    }

    #[test]
    fn test_treatment_medications_are_flattened() {
        let manager = manager();
        manager
            .add_treatment(NewTreatment {
                patient_id: "patient-1".into(),
                medications: vec![
                    Medication {
                        name: "Amoxicillin".into(),
                        dosage: "500mg".into(),
                        frequency: "3x daily".into(),
                        duration: "7 days".into(),
                        instructions: String::new(),
                    },
                    Medication {
                        name: "Ibuprofen".into(),
                        dosage: "400mg".into(),
                        frequency: "as needed".into(),
                        duration: "3 days".into(),
                        instructions: String::new(),
                    },
                ],
                cost: 150.0,
                ..Default::default()
            })
            .unwrap();

        let csv = CsvExporter::new(&manager)
            .render(CsvKind::Treatments)
            .unwrap();
        assert!(csv.contains("Amoxicillin (500mg); Ibuprofen (400mg)"));
    }

    proptest! {
        #[test]
        fn prop_escaped_cell_round_trips(s in ".*") {
            let escaped = escape_csv(&s);
            if s.contains(',') || s.contains('"') {
                prop_assert!(escaped.starts_with('"') && escaped.ends_with('"'));
                let inner = &escaped[1..escaped.len() - 1];
                prop_assert_eq!(inner.replace("\"\"", "\""), s);
            } else {
                prop_assert_eq!(escaped, s);
            }
        }
    }
}
