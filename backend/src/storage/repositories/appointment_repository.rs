//! Storage access for the appointment log.

use anyhow::Result;
use log::warn;
use std::sync::Arc;

use shared::Appointment;

use crate::storage::keys;
use crate::storage::traits::KeyValueStore;

/// Whole-blob repository for [`Appointment`] records, kept in insertion
/// order.
#[derive(Clone)]
pub struct AppointmentRepository {
    store: Arc<dyn KeyValueStore>,
}

impl AppointmentRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the log. Missing key or malformed payload reads as empty.
    pub fn load(&self) -> Result<Vec<Appointment>> {
        let Some(text) = self.store.read(keys::APPOINTMENTS)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&text) {
            Ok(appointments) => Ok(appointments),
            Err(e) => {
                warn!("malformed appointment log, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Replace the whole log
    pub fn save(&self, appointments: &[Appointment]) -> Result<()> {
        self.store
            .write(keys::APPOINTMENTS, &serde_json::to_string(appointments)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::MemoryStore;

    #[test]
    fn test_load_preserves_insertion_order() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        let repo = AppointmentRepository::new(store);
        let appointments: Vec<Appointment> = ["Checkup", "Dentist"]
            .iter()
            .map(|title| Appointment {
                id: Appointment::generate_id(),
                title: title.to_string(),
                doctor: "Dr. Lee".to_string(),
                specialty: "Pediatrics".to_string(),
                date_iso: "2025-09-01".to_string(),
                time: "10:00".to_string(),
                notes: String::new(),
                completed: false,
            })
            .collect();
        repo.save(&appointments)?;

        let titles: Vec<String> = repo.load()?.into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Checkup", "Dentist"]);
        Ok(())
    }

    #[test]
    fn test_malformed_log_reads_as_empty() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        store.write(keys::APPOINTMENTS, "{\"oops\"")?;
        let repo = AppointmentRepository::new(store);
        assert!(repo.load()?.is_empty());
        Ok(())
    }
}
