//! Best-effort detection of storage mutations made by another context
//! (another process or browser tab sharing the same data directory).
//!
//! This is the polling fallback the browser build ran on a timer: snapshot
//! the raw text of each watched key and report keys whose text changed since
//! the last poll. It is not transactionally consistent; concurrent writers
//! race and the last write wins.

use anyhow::Result;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use super::traits::KeyValueStore;

/// Polls a set of keys for externally-made changes.
///
/// Callers drive the polling from their own refresh loop; the watcher spawns
/// no threads and holds no locks between calls.
pub struct StoreWatcher {
    store: Arc<dyn KeyValueStore>,
    snapshots: HashMap<String, Option<String>>,
}

impl StoreWatcher {
    /// Watch `keys` on `store`, taking the initial snapshot now so the first
    /// `poll` only reports changes made after construction.
    pub fn new(store: Arc<dyn KeyValueStore>, keys: &[&str]) -> Self {
        let snapshots = keys
            .iter()
            .map(|key| (key.to_string(), store.read(key).unwrap_or_default()))
            .collect();
        Self { store, snapshots }
    }

    /// Compare every watched key against its snapshot and return the keys
    /// whose stored text changed. Snapshots advance to the current state, so
    /// each external change is reported exactly once.
    pub fn poll(&mut self) -> Result<Vec<String>> {
        let mut changed = Vec::new();
        for (key, snapshot) in self.snapshots.iter_mut() {
            let current = self.store.read(key)?;
            if current != *snapshot {
                debug!("storage key '{}' changed externally", key);
                changed.push(key.clone());
                *snapshot = current;
            }
        }
        changed.sort();
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_store::MemoryStore;

    #[test]
    fn test_poll_reports_each_change_once() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        store.write("vaccines_db", "[]")?;

        let mut watcher = StoreWatcher::new(store.clone(), &["vaccines_db", "appointments"]);
        assert!(watcher.poll()?.is_empty());

        store.write("vaccines_db", "[{}]")?;
        assert_eq!(watcher.poll()?, vec!["vaccines_db".to_string()]);

        // Unchanged since last poll
        assert!(watcher.poll()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_poll_sees_key_removal() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        store.write("appointments", "[]")?;

        let mut watcher = StoreWatcher::new(store.clone(), &["appointments"]);
        store.remove("appointments")?;
        assert_eq!(watcher.poll()?, vec!["appointments".to_string()]);
        Ok(())
    }
}
