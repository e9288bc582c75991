//! # Sprout Tracker Backend
//!
//! Core logic for a child-health tracker: singleton profile, vaccine
//! scheduling against the birth date, BMI history with chart geometry,
//! appointment logging, and a unified due-date feed. State persists through
//! a key-value text store (one JSON blob per collection) with optional
//! best-effort sync to a remote backend.
//!
//! All operations are synchronous and caller-driven; there are no
//! background workers. See the `storage` module for the concurrency
//! caveats of the whole-blob write model.

use anyhow::Result;
use std::sync::Arc;

pub mod domain;
pub mod remote;
pub mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreWatcher};

/// Main backend struct that wires every service over one shared store.
pub struct Backend {
    pub profile_service: domain::ProfileService,
    pub bmi_service: domain::BmiService,
    pub vaccine_service: domain::VaccineService,
    pub appointment_service: domain::AppointmentService,
    pub notification_service: domain::NotificationService,
    store: Arc<dyn KeyValueStore>,
}

impl Backend {
    /// Create a backend over `store` and run the one-time startup work
    /// (seeding the default vaccine catalog if none exists yet).
    pub fn new(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let vaccine_service = domain::VaccineService::new(store.clone());
        vaccine_service.ensure_seeded()?;

        Ok(Self {
            profile_service: domain::ProfileService::new(store.clone()),
            bmi_service: domain::BmiService::new(store.clone()),
            vaccine_service,
            appointment_service: domain::AppointmentService::new(store.clone()),
            notification_service: domain::NotificationService::new(store.clone()),
            store,
        })
    }

    /// Backend over the default on-disk data directory
    pub fn with_default_store() -> Result<Self> {
        Self::new(Arc::new(FileStore::new_default()?))
    }

    /// Watcher over every collection key, for refresh-on-external-change
    pub fn watcher(&self) -> StoreWatcher {
        StoreWatcher::new(self.store.clone(), &storage::keys::WATCHED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates;

    fn init_test_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_backend_seeds_catalog_on_startup() -> Result<()> {
        init_test_logging();
        let backend = Backend::new(Arc::new(MemoryStore::new()))?;
        assert_eq!(backend.vaccine_service.list()?.len(), 7);
        Ok(())
    }

    #[test]
    fn test_services_share_one_store() -> Result<()> {
        init_test_logging();
        let backend = Backend::new(Arc::new(MemoryStore::new()))?;
        backend.profile_service.save(&shared::ChildProfile {
            date_of_birth: "2024-01-15".to_string(),
            ..Default::default()
        })?;

        // Every seeded vaccine shows up in the feed with a due date derived
        // from the profile the other service saved
        let feed = backend
            .notification_service
            .feed(dates::parse_iso("2024-03-01").unwrap())?;
        assert_eq!(feed.len(), 7);
        assert!(feed.iter().all(|item| item.due_iso.is_some()));
        Ok(())
    }

    #[test]
    fn test_watcher_sees_service_writes_from_other_context() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        let backend = Backend::new(store.clone())?;
        let mut watcher = backend.watcher();

        // A second backend over the same store stands in for another tab
        let other = Backend::new(store)?;
        other.profile_service.save_notes("note from elsewhere")?;

        assert_eq!(watcher.poll()?, vec!["special_notes".to_string()]);
        Ok(())
    }
}
