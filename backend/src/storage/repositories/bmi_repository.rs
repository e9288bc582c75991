//! Storage access for the BMI entry collection.

use anyhow::Result;
use log::warn;
use std::sync::Arc;

use shared::BmiEntry;

use crate::storage::keys;
use crate::storage::traits::KeyValueStore;

/// Whole-blob repository for [`BmiEntry`] records: every operation reads the
/// entire collection, mutates it in memory, and writes it back.
#[derive(Clone)]
pub struct BmiRepository {
    store: Arc<dyn KeyValueStore>,
}

impl BmiRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load all entries sorted ascending by date. A missing key or a
    /// malformed payload reads as an empty collection, never an error.
    pub fn load(&self) -> Result<Vec<BmiEntry>> {
        let Some(text) = self.store.read(keys::BMI_ENTRIES)? else {
            return Ok(Vec::new());
        };
        let mut entries: Vec<BmiEntry> = match serde_json::from_str(&text) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("malformed BMI collection, treating as empty: {}", e);
                return Ok(Vec::new());
            }
        };
        // ISO dates sort correctly as plain strings
        entries.sort_by(|a, b| a.date_iso.cmp(&b.date_iso));
        Ok(entries)
    }

    /// Replace the whole collection
    pub fn save(&self, entries: &[BmiEntry]) -> Result<()> {
        self.store
            .write(keys::BMI_ENTRIES, &serde_json::to_string(entries)?)
    }

    /// Whether the one-shot demo seed has already run
    pub fn demo_seeded(&self) -> Result<bool> {
        Ok(self.store.read(keys::BMI_DEMO_SEEDED)?.is_some())
    }

    /// Mark the demo seed as done so it never reruns
    pub fn mark_demo_seeded(&self) -> Result<()> {
        self.store.write(keys::BMI_DEMO_SEEDED, "1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::MemoryStore;

    fn entry(date: &str, height: f64, weight: f64) -> BmiEntry {
        BmiEntry {
            date_iso: date.to_string(),
            height_cm: height,
            weight_kg: weight,
        }
    }

    #[test]
    fn test_load_sorts_ascending_by_date() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        let repo = BmiRepository::new(store);
        repo.save(&[
            entry("2024-06-01", 74.0, 9.0),
            entry("2024-04-01", 70.0, 8.0),
            entry("2024-05-01", 72.0, 8.5),
        ])?;

        let dates: Vec<String> = repo.load()?.into_iter().map(|e| e.date_iso).collect();
        assert_eq!(dates, vec!["2024-04-01", "2024-05-01", "2024-06-01"]);
        Ok(())
    }

    #[test]
    fn test_malformed_payload_reads_as_empty() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        store.write(keys::BMI_ENTRIES, "{not json")?;
        let repo = BmiRepository::new(store);
        assert!(repo.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_demo_seed_marker() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        let repo = BmiRepository::new(store);
        assert!(!repo.demo_seeded()?);
        repo.mark_demo_seeded()?;
        assert!(repo.demo_seeded()?);
        Ok(())
    }
}
