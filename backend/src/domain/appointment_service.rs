//! Appointment logging: create, complete, and partition the log.

use anyhow::{bail, Result};
use log::{info, warn};
use std::sync::Arc;

use shared::{Appointment, NewAppointment};

use crate::storage::repositories::AppointmentRepository;
use crate::storage::traits::KeyValueStore;

/// Service for the appointment log. Entries keep their insertion order;
/// completion is a toggle rather than a delete so the visit history stays
/// around.
#[derive(Clone)]
pub struct AppointmentService {
    repository: AppointmentRepository,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            repository: AppointmentRepository::new(store),
        }
    }

    /// The whole log in insertion order
    pub fn list(&self) -> Result<Vec<Appointment>> {
        self.repository.load()
    }

    /// Append a new appointment and return it. Title, doctor, and date are
    /// required.
    pub fn add(&self, request: NewAppointment) -> Result<Appointment> {
        self.validate(&request)?;
        let appointment = Appointment {
            id: Appointment::generate_id(),
            title: request.title.trim().to_string(),
            doctor: request.doctor.trim().to_string(),
            specialty: request.specialty.trim().to_string(),
            date_iso: request.date_iso,
            time: request.time,
            notes: request.notes,
            completed: false,
        };
        let mut log = self.repository.load()?;
        info!(
            "Adding appointment '{}' on {}",
            appointment.title, appointment.date_iso
        );
        log.push(appointment.clone());
        self.repository.save(&log)?;
        Ok(appointment)
    }

    /// Flip the completed flag on the appointment with `id`; unknown ids
    /// are a no-op.
    pub fn toggle_completed(&self, id: &str) -> Result<()> {
        let mut log = self.repository.load()?;
        let Some(appointment) = log.iter_mut().find(|a| a.id == id) else {
            warn!("toggle_completed on unknown appointment '{}' ignored", id);
            return Ok(());
        };
        appointment.completed = !appointment.completed;
        info!(
            "Appointment '{}' completed={}",
            appointment.title, appointment.completed
        );
        self.repository.save(&log)
    }

    /// Remove the appointment with `id`; unknown ids are a no-op
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut log = self.repository.load()?;
        let before = log.len();
        log.retain(|a| a.id != id);
        if log.len() < before {
            info!("Deleted appointment '{}'", id);
            self.repository.save(&log)?;
        }
        Ok(())
    }

    /// Appointments not yet completed
    pub fn upcoming(&self) -> Result<Vec<Appointment>> {
        Ok(self
            .repository
            .load()?
            .into_iter()
            .filter(|a| !a.completed)
            .collect())
    }

    /// Appointments already completed
    pub fn completed(&self) -> Result<Vec<Appointment>> {
        Ok(self
            .repository
            .load()?
            .into_iter()
            .filter(|a| a.completed)
            .collect())
    }

    fn validate(&self, request: &NewAppointment) -> Result<()> {
        if request.title.trim().is_empty() {
            bail!("appointment title is required");
        }
        if request.doctor.trim().is_empty() {
            bail!("appointment doctor is required");
        }
        if request.date_iso.trim().is_empty() {
            bail!("appointment date is required");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::MemoryStore;

    fn service() -> AppointmentService {
        AppointmentService::new(Arc::new(MemoryStore::new()))
    }

    fn request(title: &str, date_iso: &str) -> NewAppointment {
        NewAppointment {
            title: title.to_string(),
            doctor: "Dr. Lee".to_string(),
            specialty: "Pediatrics".to_string(),
            date_iso: date_iso.to_string(),
            time: "10:00".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_add_assigns_id_and_keeps_order() -> Result<()> {
        let service = service();
        let first = service.add(request("Checkup", "2025-09-01"))?;
        let second = service.add(request("Dentist", "2025-08-01"))?;
        assert_ne!(first.id, second.id);

        let titles: Vec<String> = service.list()?.into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Checkup", "Dentist"]);
        Ok(())
    }

    #[test]
    fn test_add_requires_title_doctor_and_date() {
        let service = service();
        assert!(service.add(request("", "2025-09-01")).is_err());
        assert!(service.add(request("Checkup", "")).is_err());

        let mut no_doctor = request("Checkup", "2025-09-01");
        no_doctor.doctor = "  ".to_string();
        assert!(service.add(no_doctor).is_err());
    }

    #[test]
    fn test_toggle_completed_flips_and_ignores_unknown() -> Result<()> {
        let service = service();
        let appointment = service.add(request("Checkup", "2025-09-01"))?;

        service.toggle_completed(&appointment.id)?;
        assert_eq!(service.upcoming()?.len(), 0);
        assert_eq!(service.completed()?.len(), 1);

        service.toggle_completed(&appointment.id)?;
        assert_eq!(service.upcoming()?.len(), 1);

        let before = service.list()?;
        service.toggle_completed("no-such-id")?;
        assert_eq!(service.list()?, before);
        Ok(())
    }

    #[test]
    fn test_delete_removes_by_id() -> Result<()> {
        let service = service();
        let appointment = service.add(request("Checkup", "2025-09-01"))?;
        service.delete(&appointment.id)?;
        assert!(service.list()?.is_empty());

        // Absent ids are a no-op
        service.delete(&appointment.id)?;
        Ok(())
    }
}
