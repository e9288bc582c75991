//! Test utilities for storage-backed tests.
//!
//! Provides an RAII temp-directory environment so file-store tests clean up
//! after themselves even when they panic, plus a helper bundling a
//! repository of each kind over one shared store.

use anyhow::Result;
use std::sync::Arc;
use tempfile::TempDir;

use shared::ChildProfile;

use super::file_store::FileStore;
use super::repositories::{
    AppointmentRepository, BmiRepository, ProfileRepository, VaccineRepository,
};

/// A [`FileStore`] rooted in a temporary directory that is removed when the
/// environment is dropped.
pub struct TestEnvironment {
    pub store: Arc<FileStore>,
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // keep alive so the directory survives the test body
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let store = Arc::new(FileStore::new(temp_dir.path())?);
        Ok(Self {
            store,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// One repository of each kind over a fresh test environment.
pub struct TestHelper {
    pub env: TestEnvironment,
    pub bmi_repo: BmiRepository,
    pub vaccine_repo: VaccineRepository,
    pub profile_repo: ProfileRepository,
    pub appointment_repo: AppointmentRepository,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let store: Arc<dyn super::traits::KeyValueStore> = env.store.clone();
        Ok(Self {
            bmi_repo: BmiRepository::new(store.clone()),
            vaccine_repo: VaccineRepository::new(store.clone()),
            profile_repo: ProfileRepository::new(store.clone()),
            appointment_repo: AppointmentRepository::new(store),
            env,
        })
    }

    /// Store a profile with default test values and return it
    pub fn create_test_profile(&self) -> Result<ChildProfile> {
        let profile = ChildProfile {
            first_name: "Test".to_string(),
            last_name: "Child".to_string(),
            gender: "female".to_string(),
            email: "parent@example.com".to_string(),
            phone_number: "5550000".to_string(),
            date_of_birth: "2024-01-31".to_string(),
            photo_data_url: None,
        };
        self.profile_repo.save(&profile)?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleans_up_on_drop() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
        }
        assert!(!base_path.exists());
        Ok(())
    }

    #[test]
    fn test_helper_shares_one_store() -> Result<()> {
        let helper = TestHelper::new()?;
        let profile = helper.create_test_profile()?;
        assert_eq!(helper.profile_repo.load()?, Some(profile));
        Ok(())
    }
}
