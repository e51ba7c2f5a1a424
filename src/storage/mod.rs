//! Persisted key-value state.
//!
//! All durable state of the demo lives under four named keys, each holding a
//! single JSON document. The `Storage` trait abstracts the backing surface so
//! stores can be constructed with an in-memory fake in tests.

mod file_storage;
mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

use anyhow::Result;

/// The four persisted state keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Videos,
    Profile,
    WatchHistory,
    Likes,
}

impl StorageKey {
    /// Storage name for this key, also used as the backing file stem.
    pub fn name(&self) -> &'static str {
        match self {
            StorageKey::Videos => "streamly_videos",
            StorageKey::Profile => "streamly_user",
            StorageKey::WatchHistory => "streamly_watch_history",
            StorageKey::Likes => "streamly_likes",
        }
    }
}

/// Durable key-value surface for the four state keys.
///
/// Writes to a single key are atomic; there are no cross-key transactions.
/// Two processes over the same backing state can race, and the last writer
/// wins. That is an accepted limitation of the demo scope.
pub trait Storage: Send + Sync {
    /// Returns the serialized value for the key.
    /// Returns Ok(None) if the key has never been written.
    /// Returns Err if the backing state cannot be read.
    fn get(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replaces the serialized value for the key.
    fn set(&self, key: StorageKey, value: &str) -> Result<()>;
}
