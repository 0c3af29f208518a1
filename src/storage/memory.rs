use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use crate::errors::LedgerError;

use super::{Result, StorageBackend};

/// In-process slot store, used by tests and embedders without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, e.g. with state written by an earlier session.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.lock() {
            slots.insert(key.into(), value.into());
        }
        storage
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock()
            .map(|slots| slots.contains_key(key))
            .unwrap_or(false)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| LedgerError::Storage("memory storage lock poisoned".into()))
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
