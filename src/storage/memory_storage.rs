use super::{Storage, StorageKey};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory storage, used as a fake in tests and for ephemeral runs.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.values.lock().unwrap().insert(key, value.to_owned());
        Ok(())
    }
}
