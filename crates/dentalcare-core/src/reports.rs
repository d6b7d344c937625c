//! Search, filtering, and dashboard aggregations over the stored
//! collections. Read-only; nothing here writes back.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::db::DbResult;
use crate::manager::DataManager;
use crate::models::{Appointment, AppointmentStatus, Patient};

/// Practice-level aggregates for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Appointments dated today
    pub today_appointments: usize,
    /// Future appointments still in the scheduled state
    pub upcoming_appointments: usize,
    /// Share of appointments completed, rounded to a whole percent
    pub completion_rate: i64,
    /// Sum of all treatment costs
    pub total_revenue: f64,
    /// Sum of this calendar month's treatment costs
    pub monthly_revenue: f64,
    /// Month-over-month revenue change, rounded percent; 0 when the
    /// previous month had no revenue
    pub revenue_growth: i64,
    /// Patients registered in the last 30 days
    pub new_patients_last_30_days: usize,
    /// Patients with a non-blank allergies note
    pub patients_with_allergies: usize,
}

/// Read-only query layer over a data manager.
pub struct Reports<'a> {
    manager: &'a DataManager,
}

impl<'a> Reports<'a> {
    /// Create a new report view.
    pub fn new(manager: &'a DataManager) -> Self {
        Self { manager }
    }

    /// Case-insensitive substring search over name and email, plus raw
    /// substring match over phone.
    pub fn search_patients(&self, term: &str) -> DbResult<Vec<Patient>> {
        let needle = term.to_lowercase();
        Ok(self
            .manager
            .patients()?
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.email.to_lowercase().contains(&needle)
                    || p.phone.contains(term)
            })
            .collect())
    }

    /// Filter appointments by a patient-name/type substring and an optional
    /// status, sorted chronologically (date, then time).
    pub fn filter_appointments(
        &self,
        term: &str,
        status: Option<AppointmentStatus>,
    ) -> DbResult<Vec<Appointment>> {
        let needle = term.to_lowercase();
        let mut appointments: Vec<Appointment> = self
            .manager
            .appointments()?
            .into_iter()
            .filter(|a| {
                (a.patient_name.to_lowercase().contains(&needle)
                    || a.kind.to_lowercase().contains(&needle))
                    && status.map_or(true, |wanted| a.status == wanted)
            })
            .collect();
        appointments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
        Ok(appointments)
    }

    /// Appointments dated exactly `date` (YYYY-MM-DD).
    pub fn appointments_on(&self, date: &str) -> DbResult<Vec<Appointment>> {
        Ok(self
            .manager
            .appointments()?
            .into_iter()
            .filter(|a| a.date == date)
            .collect())
    }

    /// Compute the dashboard aggregates.
    pub fn dashboard(&self) -> DbResult<DashboardSummary> {
        let patients = self.manager.patients()?;
        let appointments = self.manager.appointments()?;
        let treatments = self.manager.treatments()?;

        let now = Utc::now();
        let today = now.format("%Y-%m-%d").to_string();

        let today_appointments = appointments.iter().filter(|a| a.date == today).count();
        let upcoming_appointments = appointments
            .iter()
            .filter(|a| a.date > today && a.status == AppointmentStatus::Scheduled)
            .count();

        let completed = appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .count();
        let completion_rate = if appointments.is_empty() {
            0
        } else {
            ((completed as f64 / appointments.len() as f64) * 100.0).round() as i64
        };

        let total_revenue: f64 = treatments.iter().map(|t| t.cost).sum();

        let (this_month, this_year) = (now.month(), now.year());
        let (last_month, last_month_year) = if this_month == 1 {
            (12, this_year - 1)
        } else {
            (this_month - 1, this_year)
        };

        let revenue_in = |month: u32, year: i32| -> f64 {
            treatments
                .iter()
                .filter(|t| {
                    NaiveDate::parse_from_str(&t.date, "%Y-%m-%d")
                        .map(|d| d.month() == month && d.year() == year)
                        .unwrap_or(false)
                })
                .map(|t| t.cost)
                .sum()
        };
        let monthly_revenue = revenue_in(this_month, this_year);
        let last_month_revenue = revenue_in(last_month, last_month_year);
        let revenue_growth = if last_month_revenue == 0.0 {
            0
        } else {
            (((monthly_revenue - last_month_revenue) / last_month_revenue) * 100.0).round() as i64
        };

        let cutoff = now - Duration::days(30);
        let new_patients_last_30_days = patients
            .iter()
            .filter(|p| {
                DateTime::parse_from_rfc3339(&p.created_at)
                    .map(|created| created > cutoff)
                    .unwrap_or(false)
            })
            .count();

        let patients_with_allergies = patients
            .iter()
            .filter(|p| !p.allergies.trim().is_empty())
            .count();

        Ok(DashboardSummary {
            today_appointments,
            upcoming_appointments,
            completion_rate,
            total_revenue,
            monthly_revenue,
            revenue_growth,
            new_patients_last_30_days,
            patients_with_allergies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewAppointment, NewPatient, NewTreatment};

    fn manager() -> DataManager {
        DataManager::open_in_memory().unwrap()
    }

    fn add_patient(manager: &DataManager, name: &str, email: &str, phone: &str, allergies: &str) {
        manager
            .add_patient(NewPatient {
                name: name.into(),
                email: email.into(),
                phone: phone.into(),
                allergies: allergies.into(),
                ..Default::default()
            })
            .unwrap();
    }

    fn add_appointment(manager: &DataManager, date: &str, time: &str, status: AppointmentStatus) {
        manager
            .add_appointment(NewAppointment {
                patient_id: "patient-1".into(),
                patient_name: "Jane Doe".into(),
                date: date.into(),
                time: time.into(),
                status,
                kind: "Checkup".into(),
                notes: String::new(),
                duration_minutes: 30,
            })
            .unwrap();
    }

    #[test]
    fn test_search_patients() {
        let manager = manager();
        add_patient(&manager, "Jane Doe", "jane@example.com", "555-0100", "");
        add_patient(&manager, "John Roe", "john@example.com", "555-0200", "");

        assert_eq!(Reports::new(&manager).search_patients("JANE").unwrap().len(), 1);
        assert_eq!(Reports::new(&manager).search_patients("example").unwrap().len(), 2);
        assert_eq!(Reports::new(&manager).search_patients("0200").unwrap().len(), 1);
        assert!(Reports::new(&manager).search_patients("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_filter_appointments_sorts_chronologically() {
        let manager = manager();
        add_appointment(&manager, "2026-09-02", "09:00", AppointmentStatus::Scheduled);
        add_appointment(&manager, "2026-09-01", "15:00", AppointmentStatus::Scheduled);
        add_appointment(&manager, "2026-09-01", "08:00", AppointmentStatus::Completed);

        let all = Reports::new(&manager).filter_appointments("", None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].time, "08:00");
        assert_eq!(all[1].time, "15:00");
        assert_eq!(all[2].date, "2026-09-02");

        let scheduled = Reports::new(&manager)
            .filter_appointments("", Some(AppointmentStatus::Scheduled))
            .unwrap();
        assert_eq!(scheduled.len(), 2);
    }

    #[test]
    fn test_dashboard_counts() {
        let manager = manager();
        add_patient(&manager, "Jane Doe", "jane@example.com", "555-0100", "Penicillin");
        add_patient(&manager, "John Roe", "john@example.com", "555-0200", "  ");

        let today = Utc::now().format("%Y-%m-%d").to_string();
        add_appointment(&manager, &today, "09:00", AppointmentStatus::Completed);
        add_appointment(&manager, "2099-01-01", "09:00", AppointmentStatus::Scheduled);
        add_appointment(&manager, "2099-01-02", "09:00", AppointmentStatus::Cancelled);

        manager
            .add_treatment(NewTreatment {
                patient_id: "patient-1".into(),
                date: today.clone(),
                cost: 100.0,
                ..Default::default()
            })
            .unwrap();
        manager
            .add_treatment(NewTreatment {
                patient_id: "patient-1".into(),
                date: "2000-01-15".into(),
                cost: 50.0,
                ..Default::default()
            })
            .unwrap();

        let summary = Reports::new(&manager).dashboard().unwrap();
        assert_eq!(summary.today_appointments, 1);
        assert_eq!(summary.upcoming_appointments, 1);
        assert_eq!(summary.completion_rate, 33);
        assert_eq!(summary.total_revenue, 150.0);
        assert_eq!(summary.monthly_revenue, 100.0);
        assert_eq!(summary.new_patients_last_30_days, 2);
        assert_eq!(summary.patients_with_allergies, 1);
    }
}
