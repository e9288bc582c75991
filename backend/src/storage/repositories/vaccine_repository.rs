//! Storage access for the vaccine catalog.

use anyhow::Result;
use log::warn;
use std::sync::Arc;

use shared::VaccineRecord;

use crate::storage::keys;
use crate::storage::traits::KeyValueStore;

/// Whole-blob repository for the vaccine catalog. Seeding policy lives in
/// the vaccine service; this layer only distinguishes "key absent" from
/// "key present" so the seed runs exactly once.
#[derive(Clone)]
pub struct VaccineRepository {
    store: Arc<dyn KeyValueStore>,
}

impl VaccineRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Whether the catalog key exists at all. A present-but-malformed blob
    /// still counts as existing; reseeding over it would discard whatever
    /// the user's records were.
    pub fn exists(&self) -> Result<bool> {
        Ok(self.store.read(keys::VACCINES)?.is_some())
    }

    /// Load the catalog in stored order. Malformed payloads read as empty.
    pub fn load(&self) -> Result<Vec<VaccineRecord>> {
        let Some(text) = self.store.read(keys::VACCINES)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&text) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("malformed vaccine catalog, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Replace the whole catalog
    pub fn save(&self, records: &[VaccineRecord]) -> Result<()> {
        self.store
            .write(keys::VACCINES, &serde_json::to_string(records)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::MemoryStore;

    #[test]
    fn test_exists_distinguishes_absent_from_empty() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        let repo = VaccineRepository::new(store);
        assert!(!repo.exists()?);

        repo.save(&[])?;
        assert!(repo.exists()?);
        assert!(repo.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_catalog_reads_as_empty_but_exists() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        store.write(keys::VACCINES, "not json at all")?;
        let repo = VaccineRepository::new(store);
        assert!(repo.exists()?);
        assert!(repo.load()?.is_empty());
        Ok(())
    }
}
