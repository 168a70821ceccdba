use std::sync::Arc;

use tracing::{info, warn};

use super::client::DeliveryClient;
use super::config::DeliveryConfig;
use super::payload::{EventData, TemplateParams};
use crate::errors::NotifyError;
use crate::storage::KvStore;

/// Sends event summaries through a `DeliveryClient` using the stored credentials.
pub struct NotificationDispatcher {
    store: Arc<KvStore>,
    client: Arc<dyn DeliveryClient>,
}

impl NotificationDispatcher {
    pub fn new(store: Arc<KvStore>, client: Arc<dyn DeliveryClient>) -> Self {
        Self { store, client }
    }

    /// Stored credentials; `None` when never saved or unreadable.
    pub fn get_config(&self) -> Option<DeliveryConfig> {
        self.store.load(&self.store.keys().delivery_config)
    }

    /// Replace the stored credentials as one unit.
    pub fn save_config(&self, config: &DeliveryConfig) {
        self.store.save(&self.store.keys().delivery_config, config)
    }

    pub fn is_configured(&self) -> bool {
        self.get_config().is_some_and(|c| c.is_complete())
    }

    /// Email an event summary to `recipient`.
    ///
    /// Fails with `ConfigurationMissing` before any network call when no
    /// complete configuration is stored. Delivery errors are returned as-is.
    pub async fn send(&self, recipient: &str, event: &EventData) -> Result<(), NotifyError> {
        let config = match self.get_config() {
            Some(c) if c.is_complete() => c,
            _ => {
                common::metrics::record_notification("unconfigured");
                warn!(recipient, "notification skipped: delivery configuration missing");
                return Err(NotifyError::ConfigurationMissing);
            }
        };

        let params = TemplateParams::build(recipient, event);
        let result = self
            .client
            .send(&config.service_id, &config.template_id, &params, &config.public_key)
            .await;

        match result {
            Ok(()) => {
                common::metrics::record_notification("sent");
                info!(recipient, subject = %params.subject, "notification sent");
                Ok(())
            }
            Err(e) => {
                common::metrics::record_notification("failed");
                warn!(recipient, subject = %params.subject, error = %e, "notification delivery failed");
                Err(e.into())
            }
        }
    }
}
