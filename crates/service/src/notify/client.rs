use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::payload::TemplateParams;
use crate::errors::DeliveryError;

/// Trait abstraction for the external email delivery service.
/// One call is one delivery attempt; implementations do not retry.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> Result<(), DeliveryError>;
}

#[derive(Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Client for the EmailJS REST API (`POST /api/v1.0/email/send`).
#[derive(Clone)]
pub struct EmailJsClient {
    http: reqwest::Client,
    endpoint: String,
}

impl EmailJsClient {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        let endpoint = format!("{}/api/v1.0/email/send", api_base.trim_end_matches('/'));
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DeliveryClient for EmailJsClient {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
        public_key: &str,
    ) -> Result<(), DeliveryError> {
        let body = EmailJsRequest { service_id, template_id, user_id: public_key, template_params: params };
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            debug!(endpoint = %self.endpoint, %status, "emailjs accepted message");
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected { status: status.as_u16(), body })
    }
}

/// Recording in-memory client for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedSend {
        pub service_id: String,
        pub template_id: String,
        pub params: TemplateParams,
        pub public_key: String,
    }

    #[derive(Default)]
    pub struct RecordingClient {
        calls: Mutex<Vec<RecordedSend>>,
        fail_with: Mutex<Option<DeliveryError>>,
    }

    impl RecordingClient {
        pub fn failing(err: DeliveryError) -> Self {
            Self { calls: Mutex::default(), fail_with: Mutex::new(Some(err)) }
        }

        pub fn calls(&self) -> Vec<RecordedSend> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl DeliveryClient for RecordingClient {
        async fn send(
            &self,
            service_id: &str,
            template_id: &str,
            params: &TemplateParams,
            public_key: &str,
        ) -> Result<(), DeliveryError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(RecordedSend {
                    service_id: service_id.to_string(),
                    template_id: template_id.to_string(),
                    params: params.clone(),
                    public_key: public_key.to_string(),
                });
            }
            let failure = self.fail_with.lock().ok().and_then(|f| f.clone());
            match failure {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }
}
