//! Key-value stores backing persisted records.

use super::error::PersistenceError;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// String key-value storage, rewritten one whole record at a time.
pub trait KeyValueStore: Send {
    /// Read the record stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the record stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

/// In-memory store.
///
/// Clones share the same contents, so a caller can keep a handle to inspect
/// what a session wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.records().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.records().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store keeping each record in `<dir>/<key>.json`.
///
/// Writes go to a temporary file that is then renamed over the record, so a
/// crash mid-write never leaves a truncated record behind.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let io_error = |source| PersistenceError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_error)?;
        let path = self.path(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).map_err(io_error)?;
        fs::rename(&temp_path, &path).map_err(io_error)?;
        Ok(())
    }
}
