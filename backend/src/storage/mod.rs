//! # Storage Module
//!
//! Key-value text storage with one JSON blob per collection. The domain
//! layer only ever sees the [`KeyValueStore`] trait; the production
//! substrate is a directory of per-key files ([`FileStore`]) and tests use
//! the in-memory fake ([`MemoryStore`]).
//!
//! All writes are whole-blob read-modify-write. Two contexts mutating the
//! same collection concurrently race, and the last writer wins; the
//! [`StoreWatcher`] gives callers a best-effort signal that an external
//! context changed something.

pub mod file_store;
pub mod keys;
pub mod memory_store;
pub mod repositories;
pub mod traits;
pub mod watcher;

#[cfg(test)]
pub mod test_utils;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::KeyValueStore;
pub use watcher::StoreWatcher;
