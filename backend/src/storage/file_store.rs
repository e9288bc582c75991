//! File-backed key-value store: one file per collection key under a base
//! directory, mirroring how the browser build keeps one local-storage entry
//! per collection.

use anyhow::Result;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::traits::KeyValueStore;

/// Directory-backed [`KeyValueStore`]. Each key maps to a single file whose
/// entire contents are the stored text, so every write is a whole-blob
/// replacement and the last writer wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_directory: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `base_directory`, creating the directory if
    /// it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }
        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a store in the default data directory,
    /// `~/Documents/Sprout Tracker` (falling back to the home directory when
    /// no Documents folder is known).
    pub fn new_default() -> Result<Self> {
        let parent = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("could not determine a home directory"))?;
        let data_dir = parent.join("Sprout Tracker");
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Base directory this store reads and writes under
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_directory.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, text: &str) -> Result<()> {
        fs::write(self.path_for(key), text)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("remove of absent key '{}' ignored", key);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
