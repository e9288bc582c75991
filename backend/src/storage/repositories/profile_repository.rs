//! Storage access for the singleton child profile and the caregiver notes.

use anyhow::Result;
use log::warn;
use serde::Deserialize;
use std::sync::Arc;

use shared::ChildProfile;

use crate::storage::keys;
use crate::storage::traits::KeyValueStore;

/// Intermediate struct for deserializing stored profiles. Profiles written
/// by older deployments carry legacy fields (`childName`, `birthdateISO`)
/// and a numeric `phoneNumber`; every field is optional here and the
/// repository normalizes the result into the current [`ChildProfile`] shape.
#[derive(Debug, Deserialize)]
struct StoredProfile {
    #[serde(rename = "firstName", default)]
    first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    last_name: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(rename = "phoneNumber", default)]
    phone_number: Option<serde_json::Value>,
    #[serde(rename = "dateOfBirth", default)]
    date_of_birth: Option<String>,
    #[serde(rename = "childName", default)]
    child_name: Option<String>,
    #[serde(rename = "birthdateISO", default)]
    birthdate_iso: Option<String>,
    #[serde(rename = "photoDataUrl", default)]
    photo_data_url: Option<String>,
}

impl StoredProfile {
    /// Backfill the current shape from whichever fields the stored payload
    /// actually had.
    fn normalize(self) -> ChildProfile {
        let child_name = self.child_name.unwrap_or_default();
        let first_name = self
            .first_name
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                child_name
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string()
            });
        let last_name = self.last_name.filter(|s| !s.is_empty()).unwrap_or_else(|| {
            child_name
                .split_whitespace()
                .skip(1)
                .collect::<Vec<_>>()
                .join(" ")
        });
        let date_of_birth = self
            .date_of_birth
            .filter(|s| !s.is_empty())
            .or(self.birthdate_iso)
            .unwrap_or_default();
        let phone_number = match self.phone_number {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        ChildProfile {
            first_name,
            last_name,
            gender: self.gender.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone_number,
            date_of_birth,
            photo_data_url: self.photo_data_url,
        }
    }
}

/// Repository for the singleton profile blob and the special-notes text.
#[derive(Clone)]
pub struct ProfileRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ProfileRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load and normalize the profile. Missing key or malformed JSON is
    /// `None`.
    pub fn load(&self) -> Result<Option<ChildProfile>> {
        let Some(text) = self.store.read(keys::PROFILE)? else {
            return Ok(None);
        };
        match serde_json::from_str::<StoredProfile>(&text) {
            Ok(stored) => Ok(Some(stored.normalize())),
            Err(e) => {
                warn!("malformed profile, treating as absent: {}", e);
                Ok(None)
            }
        }
    }

    /// Replace the stored profile
    pub fn save(&self, profile: &ChildProfile) -> Result<()> {
        self.store
            .write(keys::PROFILE, &serde_json::to_string(profile)?)
    }

    /// Caregiver notes; a missing key reads as the empty string
    pub fn load_notes(&self) -> Result<String> {
        Ok(self.store.read(keys::SPECIAL_NOTES)?.unwrap_or_default())
    }

    pub fn save_notes(&self, text: &str) -> Result<()> {
        self.store.write(keys::SPECIAL_NOTES, text)
    }
}
