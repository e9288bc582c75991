//! Vaccine catalog management and due-date scheduling.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use shared::{ChildProfile, VaccineRecord, VaccineUpdate};

use super::dates;
use crate::storage::repositories::VaccineRepository;
use crate::storage::traits::KeyValueStore;

/// The default catalog seeded into a fresh installation: id, display name,
/// company, and offset in months from the birth date.
const DEFAULT_CATALOG: [(&str, &str, &str, u32); 7] = [
    ("bcg-0", "BCG", "Generic", 0),
    ("hepB-0", "HepB (birth)", "Generic", 0),
    ("opv-2", "OPV", "Generic", 2),
    ("dtp-2", "DTP", "Generic", 2),
    ("ipv-2", "IPV", "Generic", 2),
    ("dtp-4", "DTP (booster)", "Generic", 4),
    ("mmr-12", "MMR", "Generic", 12),
];

/// Due date for a dose scheduled `offset_months` after birth: the profile's
/// birth date plus that many calendar months (day-of-month clamped when the
/// target month is shorter). `None` when there is no profile or its birth
/// date does not parse.
pub fn due_date_iso(offset_months: u32, profile: Option<&ChildProfile>) -> Option<String> {
    let birth = dates::parse_iso(&profile?.date_of_birth)?;
    Some(dates::format_iso(dates::add_months(birth, offset_months)))
}

/// Service for the vaccine catalog: seeded defaults, custom records, and
/// administered tracking.
#[derive(Clone)]
pub struct VaccineService {
    repository: VaccineRepository,
}

impl VaccineService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            repository: VaccineRepository::new(store),
        }
    }

    /// Write the default catalog if no catalog exists yet. Called once at
    /// startup rather than implicitly on every read, so reads stay reads.
    pub fn ensure_seeded(&self) -> Result<()> {
        if self.repository.exists()? {
            return Ok(());
        }
        let defaults: Vec<VaccineRecord> = DEFAULT_CATALOG
            .iter()
            .map(|&(id, name, company, offset_months)| VaccineRecord {
                id: id.to_string(),
                name: name.to_string(),
                company: company.to_string(),
                offset_months,
                is_custom: false,
                administered: false,
                administered_date_iso: None,
            })
            .collect();
        info!("Seeding default vaccine catalog ({} records)", defaults.len());
        self.repository.save(&defaults)
    }

    /// The catalog in stored order (defaults first, customs appended)
    pub fn list(&self) -> Result<Vec<VaccineRecord>> {
        self.repository.load()
    }

    /// Append a custom record and return it. The id derives from the
    /// normalized name plus the creation timestamp.
    pub fn add_custom(
        &self,
        name: &str,
        company: &str,
        offset_months: u32,
    ) -> Result<VaccineRecord> {
        let record = VaccineRecord {
            id: VaccineRecord::generate_custom_id(name, Utc::now().timestamp_millis()),
            name: name.to_string(),
            company: company.to_string(),
            offset_months,
            is_custom: true,
            administered: false,
            administered_date_iso: None,
        };
        let mut catalog = self.repository.load()?;
        info!("Adding custom vaccine '{}' ({})", record.name, record.id);
        catalog.push(record.clone());
        self.repository.save(&catalog)?;
        Ok(record)
    }

    /// Merge `changes` into the record with `id`; unknown ids are a no-op
    pub fn update(&self, id: &str, changes: VaccineUpdate) -> Result<()> {
        let mut catalog = self.repository.load()?;
        let Some(record) = catalog.iter_mut().find(|r| r.id == id) else {
            warn!("update of unknown vaccine '{}' ignored", id);
            return Ok(());
        };
        if let Some(name) = changes.name {
            record.name = name;
        }
        if let Some(company) = changes.company {
            record.company = company;
        }
        if let Some(offset_months) = changes.offset_months {
            record.offset_months = offset_months;
        }
        info!("Updated vaccine '{}'", id);
        self.repository.save(&catalog)
    }

    /// Remove the record with `id`; unknown ids are a no-op. Callers
    /// restrict deletion to custom records.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut catalog = self.repository.load()?;
        let before = catalog.len();
        catalog.retain(|r| r.id != id);
        if catalog.len() < before {
            info!("Deleted vaccine '{}'", id);
            self.repository.save(&catalog)?;
        }
        Ok(())
    }

    /// Set the administered flag. Turning it on stamps the administered
    /// date with `date_iso` (or today when not given); turning it off
    /// clears the stamp.
    pub fn set_administered(
        &self,
        id: &str,
        administered: bool,
        date_iso: Option<&str>,
    ) -> Result<()> {
        let mut catalog = self.repository.load()?;
        let Some(record) = catalog.iter_mut().find(|r| r.id == id) else {
            warn!("set_administered on unknown vaccine '{}' ignored", id);
            return Ok(());
        };
        record.administered = administered;
        record.administered_date_iso = if administered {
            Some(
                date_iso
                    .map(str::to_string)
                    .unwrap_or_else(|| dates::format_iso(dates::today_local())),
            )
        } else {
            None
        };
        info!("Vaccine '{}' administered={}", id, administered);
        self.repository.save(&catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::MemoryStore;

    fn service() -> VaccineService {
        VaccineService::new(Arc::new(MemoryStore::new()))
    }

    fn profile_born(date_of_birth: &str) -> ChildProfile {
        ChildProfile {
            date_of_birth: date_of_birth.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ensure_seeded_writes_defaults_once() -> Result<()> {
        let service = service();
        service.ensure_seeded()?;

        let catalog = service.list()?;
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog[0].id, "bcg-0");
        assert_eq!(catalog[6].id, "mmr-12");
        assert_eq!(catalog[6].offset_months, 12);
        assert!(catalog.iter().all(|r| !r.is_custom && !r.administered));

        // A second call must not clobber user changes
        for record in service.list()? {
            if record.id != "bcg-0" {
                service.delete(&record.id)?;
            }
        }
        service.ensure_seeded()?;
        assert_eq!(service.list()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_add_custom_appends_with_generated_id() -> Result<()> {
        let service = service();
        service.ensure_seeded()?;
        let record = service.add_custom("Flu Shot", "Acme", 6)?;

        assert!(record.id.starts_with("flu-shot-"));
        assert!(record.is_custom);
        assert!(!record.administered);

        let catalog = service.list()?;
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.last().unwrap().id, record.id);
        Ok(())
    }

    #[test]
    fn test_update_merges_fields_and_ignores_unknown_id() -> Result<()> {
        let service = service();
        service.ensure_seeded()?;

        service.update(
            "opv-2",
            VaccineUpdate {
                company: Some("Acme".to_string()),
                offset_months: Some(3),
                ..Default::default()
            },
        )?;
        let record = service
            .list()?
            .into_iter()
            .find(|r| r.id == "opv-2")
            .unwrap();
        assert_eq!(record.name, "OPV"); // untouched
        assert_eq!(record.company, "Acme");
        assert_eq!(record.offset_months, 3);

        let before = service.list()?;
        service.update("no-such-id", VaccineUpdate::default())?;
        assert_eq!(service.list()?, before);
        Ok(())
    }

    #[test]
    fn test_delete_is_noop_for_unknown_id() -> Result<()> {
        let service = service();
        service.ensure_seeded()?;
        service.delete("no-such-id")?;
        assert_eq!(service.list()?.len(), 7);

        service.delete("mmr-12")?;
        assert_eq!(service.list()?.len(), 6);
        Ok(())
    }

    #[test]
    fn test_set_administered_stamps_and_clears_date() -> Result<()> {
        let service = service();
        service.ensure_seeded()?;

        service.set_administered("bcg-0", true, Some("2024-02-01"))?;
        let record = service
            .list()?
            .into_iter()
            .find(|r| r.id == "bcg-0")
            .unwrap();
        assert!(record.administered);
        assert_eq!(record.administered_date_iso.as_deref(), Some("2024-02-01"));

        service.set_administered("bcg-0", false, None)?;
        let record = service
            .list()?
            .into_iter()
            .find(|r| r.id == "bcg-0")
            .unwrap();
        assert!(!record.administered);
        assert_eq!(record.administered_date_iso, None);
        Ok(())
    }

    #[test]
    fn test_set_administered_defaults_to_today() -> Result<()> {
        let service = service();
        service.ensure_seeded()?;
        service.set_administered("bcg-0", true, None)?;
        let record = service
            .list()?
            .into_iter()
            .find(|r| r.id == "bcg-0")
            .unwrap();
        assert_eq!(
            record.administered_date_iso,
            Some(dates::format_iso(dates::today_local()))
        );
        Ok(())
    }

    #[test]
    fn test_due_date_uses_clamped_month_addition() {
        let profile = profile_born("2024-01-31");
        assert_eq!(
            due_date_iso(2, Some(&profile)),
            Some("2024-03-31".to_string())
        );
        // One month from Jan 31 clamps to the end of February
        assert_eq!(
            due_date_iso(1, Some(&profile)),
            Some("2024-02-29".to_string())
        );
        // Into a 30-day month
        assert_eq!(
            due_date_iso(3, Some(&profile)),
            Some("2024-04-30".to_string())
        );
        assert_eq!(
            due_date_iso(0, Some(&profile)),
            Some("2024-01-31".to_string())
        );
    }

    #[test]
    fn test_due_date_without_profile_or_birth_date() {
        assert_eq!(due_date_iso(2, None), None);
        assert_eq!(due_date_iso(2, Some(&profile_born(""))), None);
        assert_eq!(due_date_iso(2, Some(&profile_born("soon"))), None);
    }
}
