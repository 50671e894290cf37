//! Flat key-value persistence for plugin state.
//!
//! Values are opaque strings (JSON documents in practice). Callers treat
//! every failure as "nothing persisted" rather than surfacing it.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::StorageError;

pub trait KeyValueStore: std::fmt::Debug {
    /// `None` when the key was never written or cannot be read.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, "reading stored value failed: {e}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Write then rename so a crash never leaves a half-written value.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load a JSON value stored under `key`, falling back to `T::default()` when
/// it is absent or malformed.
pub fn load_json<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(key, "ignoring malformed stored value: {e}");
        T::default()
    })
}

/// Serialize and store `value`; failures are logged and dropped.
pub fn save_json<T>(store: &mut dyn KeyValueStore, key: &str, value: &T)
where
    T: serde::Serialize + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|json| store.set(key, &json));
    if let Err(e) = result {
        tracing::warn!(key, "state not persisted: {e}");
    }
}
