//! Event notification emails.
//!
//! Credentials live in the store under the reserved delivery key. A send
//! builds the template parameters from the event and hands them to a
//! `DeliveryClient` exactly once; whatever the client returns is passed on.

pub mod config;
pub mod payload;
pub mod client;
pub mod dispatcher;

pub use client::{DeliveryClient, EmailJsClient};
pub use config::DeliveryConfig;
pub use dispatcher::NotificationDispatcher;
pub use payload::{EventData, TemplateParams};
