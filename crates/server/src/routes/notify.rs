use axum::{extract::State, http::StatusCode, Json};
use common::types::ConfiguredStatus;
use serde::Deserialize;
use service::notify::{DeliveryConfig, EventData};

use super::collections::with_store;
use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Deserialize, Debug)]
pub struct SendRequest {
    pub recipient: String,
    pub event: EventData,
}

pub async fn get_config(State(state): State<ServerState>) -> Result<Json<Option<DeliveryConfig>>, ApiError> {
    let config = with_store(&state.dispatcher, |d| d.get_config()).await?;
    Ok(Json(config))
}

pub async fn put_config(
    State(state): State<ServerState>,
    Json(config): Json<DeliveryConfig>,
) -> Result<StatusCode, ApiError> {
    with_store(&state.dispatcher, move |d| d.save_config(&config)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn status(State(state): State<ServerState>) -> Result<Json<ConfiguredStatus>, ApiError> {
    let configured = with_store(&state.dispatcher, |d| d.is_configured()).await?;
    Ok(Json(ConfiguredStatus { configured }))
}

/// Loose shape check; the delivery service does the real validation.
fn validate_recipient(recipient: &str) -> Result<&str, ApiError> {
    let r = recipient.trim();
    match r.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !r.contains(char::is_whitespace) => {
            Ok(r)
        }
        _ => Err(ApiError::BadRequest(format!("invalid recipient address: {recipient:?}"))),
    }
}

pub async fn send(
    State(state): State<ServerState>,
    Json(req): Json<SendRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let recipient = validate_recipient(&req.recipient)?;
    state.dispatcher.send(recipient, &req.event).await?;
    Ok(Json(serde_json::json!({"ok": true})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_shape() {
        assert_eq!(validate_recipient(" a@b.com ").unwrap(), "a@b.com");
        assert!(validate_recipient("a@b").is_err());
        assert!(validate_recipient("@b.com").is_err());
        assert!(validate_recipient("a b@c.com").is_err());
        assert!(validate_recipient("").is_err());
    }
}
