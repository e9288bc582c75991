//! Singleton child profile and caregiver notes.

use anyhow::Result;
use log::info;
use std::sync::Arc;

use shared::ChildProfile;

use super::dates;
use crate::storage::repositories::ProfileRepository;
use crate::storage::traits::KeyValueStore;

/// Service for the one profile per installation. There is no id and no
/// list: saving replaces the singleton, loading returns it or `None`.
#[derive(Clone)]
pub struct ProfileService {
    repository: ProfileRepository,
}

impl ProfileService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            repository: ProfileRepository::new(store),
        }
    }

    /// The stored profile, normalized from whatever shape is on disk.
    /// `None` when nothing has been saved yet or the blob is malformed.
    pub fn get(&self) -> Result<Option<ChildProfile>> {
        self.repository.load()
    }

    /// Replace the stored profile
    pub fn save(&self, profile: &ChildProfile) -> Result<()> {
        info!("Saving profile for {}", profile.display_name());
        self.repository.save(profile)
    }

    /// Age of the child as of `reference`, formatted as `"2y 3m"` / `"7m"`.
    /// `None` without a stored profile, a parseable birth date, or when the
    /// reference date precedes the birth date.
    pub fn age_at(&self, reference_iso: &str) -> Result<Option<String>> {
        let Some(profile) = self.repository.load()? else {
            return Ok(None);
        };
        let reference = dates::parse_iso(reference_iso);
        let birth = dates::parse_iso(&profile.date_of_birth);
        Ok(match (reference, birth) {
            (Some(reference), Some(birth)) => dates::format_age(reference, birth),
            _ => None,
        })
    }

    /// Caregiver notes; empty string when none were saved
    pub fn notes(&self) -> Result<String> {
        self.repository.load_notes()
    }

    pub fn save_notes(&self, text: &str) -> Result<()> {
        self.repository.save_notes(text)
    }
}
