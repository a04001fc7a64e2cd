//! Cart Storage
//!
//! Synchronous string key/value backends that hold serialized cart snapshots.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use thiserror::Error;

/// Errors raised by a cart storage backend.
#[derive(Debug, Error)]
pub enum CartStorageError {
    /// Underlying filesystem failure
    #[error("cart storage I/O failed")]
    Io(#[from] std::io::Error),

    /// Key contains characters that cannot be used as a storage name
    #[error("invalid cart storage key: {0}")]
    InvalidKey(String),

    /// Backend cannot currently be reached
    #[error("cart storage is unavailable")]
    Unavailable,
}

/// Durable string storage keyed by name.
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStorageError`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, CartStorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStorageError`] if the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), CartStorageError>;
}

/// In-process storage. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCartStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        let values = self
            .values
            .lock()
            .map_err(|_poisoned| CartStorageError::Unavailable)?;

        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CartStorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_poisoned| CartStorageError::Unavailable)?;

        values.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// Storage that keeps one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    dir: PathBuf,
}

impl FileCartStorage {
    /// Use `dir` as the storage directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CartStorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(CartStorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileCartStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CartStorageError> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.dir)?;

        // Write then rename so a reader never sees a half-written snapshot.
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }
}
