//! Runtime wiring helpers
//!
//! Build the storage backend and notification stack from `configs` so binary
//! crates do not need to know about the concrete implementations.

use std::{sync::Arc, time::Duration};

use configs::{EmailConfig, StorageBackendKind, StorageConfig};
use tracing::info;

use crate::errors::{DeliveryError, StorageError};
use crate::notify::{EmailJsClient, NotificationDispatcher};
use crate::storage::{FileBackend, KvStore, MemoryBackend, StorageBackend, StorageKeys};

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(frontend_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir, data_dir).await
}

pub fn build_backend(cfg: &StorageConfig) -> Result<Arc<dyn StorageBackend>, StorageError> {
    let backend: Arc<dyn StorageBackend> = match cfg.backend {
        StorageBackendKind::File => {
            let file = FileBackend::open(&cfg.path, cfg.quota_bytes)?;
            info!(path = %file.path().display(), quota = cfg.quota_bytes, "file store opened");
            Arc::new(file)
        }
        StorageBackendKind::Memory => {
            info!(quota = cfg.quota_bytes, "using volatile in-memory store");
            Arc::new(MemoryBackend::with_quota(cfg.quota_bytes))
        }
    };
    Ok(backend)
}

pub fn build_store(cfg: &StorageConfig) -> Result<Arc<KvStore>, StorageError> {
    Ok(Arc::new(KvStore::new(build_backend(cfg)?, StorageKeys::default())))
}

pub fn build_dispatcher(store: Arc<KvStore>, cfg: &EmailConfig) -> Result<Arc<NotificationDispatcher>, DeliveryError> {
    let client = EmailJsClient::new(&cfg.api_base, Duration::from_secs(cfg.request_timeout_secs))?;
    info!(endpoint = %client.endpoint(), "email delivery client ready");
    Ok(Arc::new(NotificationDispatcher::new(store, Arc::new(client))))
}
