// Key-value storage module.
// A narrow fallible interface over persistent string storage.

pub mod file;
pub mod memory;
pub mod paths;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// The single failure result every backend maps its errors to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub(crate) fn unavailable(reason: impl ToString) -> Self {
        StorageError::Unavailable(reason.to_string())
    }
}

/// String-keyed persistent storage.
///
/// Implementations must make `set` atomic for a single key: a reader sees
/// either the previous value or the new one.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
