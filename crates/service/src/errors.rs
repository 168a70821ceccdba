use thiserror::Error;

/// Failures of the raw storage substrate. Never leave `KvStore`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a delivery client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("delivery rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Errors surfaced by `NotificationDispatcher::send`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("delivery configuration missing")]
    ConfigurationMissing,
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl NotifyError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            NotifyError::ConfigurationMissing => 2001,
            NotifyError::Delivery(DeliveryError::Transport(_)) => 2101,
            NotifyError::Delivery(DeliveryError::Rejected { .. }) => 2102,
        }
    }
}
