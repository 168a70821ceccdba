use std::{
    collections::HashMap,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::{info, warn};

use super::backend::{size_after_write, StorageBackend};
use crate::errors::StorageError;

/// File-backed key-value storage.
///
/// Keeps every entry in memory and persists the whole map as one JSON object
/// (`{ key: text }`) on each mutation. A write that would exceed the quota,
/// or whose file write fails, leaves both the map and the file unchanged.
pub struct FileBackend {
    inner: RwLock<HashMap<String, String>>,
    file_path: PathBuf,
    quota: usize,
}

impl FileBackend {
    /// Open the store at `path`. Creates the file with an empty map if missing;
    /// a corrupt file is logged and treated as empty.
    pub fn open<P: Into<PathBuf>>(path: P, quota: usize) -> Result<Self, StorageError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let map: HashMap<String, String> = match fs::read(&file_path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "store file is corrupt; starting empty");
                HashMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let empty: HashMap<String, String> = HashMap::new();
                write_map(&file_path, &empty)?;
                info!(path = %file_path.display(), "created empty store file");
                empty
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { inner: RwLock::new(map), file_path, quota })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>, StorageError> {
        self.inner.read().map_err(|_| StorageError::Unavailable("store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>, StorageError> {
        self.inner.write().map_err(|_| StorageError::Unavailable("store lock poisoned".into()))
    }

    /// Apply a mutation to a copy of the map, persist it, then commit it.
    fn update_map<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut HashMap<String, String>) -> Result<(), StorageError>,
    {
        let mut map = self.write()?;
        let mut next = map.clone();
        f(&mut next)?;
        write_map(&self.file_path, &next)?;
        *map = next;
        Ok(())
    }
}

/// Sibling file the next map is staged in before it replaces the store.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Persist the map without ever truncating the live file: stage, sync, rename.
fn write_map(path: &Path, map: &HashMap<String, String>) -> Result<(), StorageError> {
    let data = serde_json::to_vec(map)?;
    let staging = staging_path(path);
    let mut file = File::create(&staging)?;
    file.write_all(&data)?;
    file.sync_all()?;
    drop(file);
    fs::rename(&staging, path)?;
    Ok(())
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let quota = self.quota;
        self.update_map(|map| {
            let needed = size_after_write(map.iter().map(|(k, v)| (k.as_str(), v.as_str())), key, value);
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
            map.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if !self.read()?.contains_key(key) {
            return Ok(());
        }
        self.update_map(|map| {
            map.remove(key);
            Ok(())
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.update_map(|map| {
            map.clear();
            Ok(())
        })
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.read()?.keys().cloned().collect())
    }
}
