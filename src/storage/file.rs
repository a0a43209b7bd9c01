// Directory-backed key-value store.
// One file per key, written atomically through a uniquely named temp file and rename.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::paths::key_path;
use super::{KeyValueStore, StorageError};

/// Persistent store rooted at a directory.
///
/// A store without a root (no resolvable home directory) behaves like
/// disabled storage: every call reports `Unavailable`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: Option<PathBuf>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// A store with no backing directory.
    pub fn unavailable() -> Self {
        Self { root: None }
    }

    /// Open at the given root, or unavailable when there is none.
    pub fn open(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        self.root
            .as_deref()
            .map(|root| key_path(root, key))
            .ok_or_else(|| StorageError::unavailable("no storage directory"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::unavailable(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        write_atomic(&path, value).map_err(StorageError::unavailable)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::unavailable(e)),
        }
    }
}

/// Each writer gets its own temp file, so concurrent writers never share
/// bytes; the last rename wins.
fn write_atomic(path: &Path, text: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "key path has no parent"))?;
    fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(text.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
