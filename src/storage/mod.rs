pub mod json_backend;
pub mod memory;

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over a key-value slot store holding serialized state.
///
/// Every write replaces the whole value stored under the key.
pub trait StorageBackend: Send + Sync {
    /// Returns the raw value stored under `key`, or `None` when the slot is empty.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    /// Removes the slot entirely. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
