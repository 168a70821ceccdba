use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use dashmap::DashMap;

use super::backend::StorageBackend;
use crate::errors::StorageError;

/// Volatile storage held in a concurrent map.
///
/// Used for tests and for `storage.backend = "memory"`. It can be switched
/// off to mimic a browser with storage disabled.
#[derive(Default)]
pub struct MemoryBackend {
    map: DashMap<String, String>,
    /// Running key+value byte total. Every mutation holds this lock so the
    /// quota check and the write happen as one step.
    used: Mutex<usize>,
    quota: Option<usize>,
    disabled: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self { quota: Some(quota), ..Self::default() }
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    fn ensure_enabled(&self) -> Result<(), StorageError> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("storage disabled".into()));
        }
        Ok(())
    }

    fn lock_used(&self) -> Result<MutexGuard<'_, usize>, StorageError> {
        self.used
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))
    }

    fn entry_size(&self, key: &str) -> usize {
        self.map.get(key).map(|v| key.len() + v.value().len()).unwrap_or(0)
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_enabled()?;
        Ok(self.map.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_enabled()?;
        let mut used = self.lock_used()?;
        let needed = *used - self.entry_size(key) + key.len() + value.len();
        if let Some(quota) = self.quota {
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }
        self.map.insert(key.to_string(), value.to_string());
        *used = needed;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.ensure_enabled()?;
        let mut used = self.lock_used()?;
        if let Some((k, v)) = self.map.remove(key) {
            *used -= k.len() + v.len();
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.ensure_enabled()?;
        let mut used = self.lock_used()?;
        self.map.clear();
        *used = 0;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.ensure_enabled()?;
        Ok(self.map.iter().map(|e| e.key().clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_basic_crud() -> Result<(), StorageError> {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get_item("a")?, None);

        backend.set_item("a", "1")?;
        backend.set_item("b", "2")?;
        assert_eq!(backend.get_item("a")?.as_deref(), Some("1"));

        backend.remove_item("a")?;
        assert_eq!(backend.get_item("a")?, None);
        assert_eq!(backend.keys()?, vec!["b".to_string()]);

        backend.clear()?;
        assert!(backend.keys()?.is_empty());
        Ok(())
    }

    #[test]
    fn memory_backend_enforces_quota() {
        let backend = MemoryBackend::with_quota(10);
        backend.set_item("k", "12345").unwrap();
        // replacing the same key only counts the new value
        backend.set_item("k", "123456789").unwrap();
        let err = backend.set_item("x", "123").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { needed: 14, quota: 10 }));
        assert_eq!(backend.get_item("x").unwrap(), None);
    }

    #[test]
    fn concurrent_writers_never_exceed_quota() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        const QUOTA: usize = 1000;
        const WRITERS: usize = 16;
        let backend = Arc::new(MemoryBackend::with_quota(QUOTA));

        for _ in 0..200 {
            backend.clear().unwrap();
            let barrier = Arc::new(Barrier::new(WRITERS));
            let handles: Vec<_> = (0..WRITERS)
                .map(|i| {
                    let backend = Arc::clone(&backend);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        let _ = backend.set_item(&format!("k{i:02}"), &"x".repeat(96));
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let total: usize = backend
                .keys()
                .unwrap()
                .iter()
                .map(|k| k.len() + backend.get_item(k).unwrap().map(|v| v.len()).unwrap_or(0))
                .sum();
            assert!(total <= QUOTA, "quota exceeded: {total}");
            // 99 bytes per entry: exactly ten fit
            assert_eq!(backend.keys().unwrap().len(), 10);
        }
    }

    #[test]
    fn removal_frees_quota() {
        let backend = MemoryBackend::with_quota(10);
        backend.set_item("k", "123456789").unwrap();
        assert!(backend.set_item("x", "1").is_err());
        backend.remove_item("k").unwrap();
        backend.set_item("x", "123456789").unwrap();
        backend.clear().unwrap();
        backend.set_item("k", "123456789").unwrap();
    }

    #[test]
    fn disabled_backend_reports_unavailable() {
        let backend = MemoryBackend::new();
        backend.set_disabled(true);
        assert!(matches!(backend.get_item("a"), Err(StorageError::Unavailable(_))));
        assert!(matches!(backend.set_item("a", "1"), Err(StorageError::Unavailable(_))));
        backend.set_disabled(false);
        assert!(backend.set_item("a", "1").is_ok());
    }
}
