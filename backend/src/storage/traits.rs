//! # Storage Traits
//!
//! This module defines the storage abstraction the domain layer is written
//! against. The production substrate is a browser-local-storage-style
//! key-value text store; tests substitute an in-memory fake.

use anyhow::Result;

/// Key-value text store addressed by fixed collection keys.
///
/// Payloads are JSON-encoded arrays/objects (the special-notes key holds raw
/// text). Implementations only move strings around; all decoding and
/// recovery from malformed payloads happens in the repositories, so a store
/// never has to understand what it is holding.
pub trait KeyValueStore: Send + Sync {
    /// Read the text stored under `key`, or `None` when the key is absent
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write `text` under `key`, replacing any previous value
    fn write(&self, key: &str, text: &str) -> Result<()>;

    /// Delete `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<()>;
}
