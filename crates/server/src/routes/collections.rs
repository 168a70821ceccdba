use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::errors::ModelError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use service::storage::Collection;
use tracing::info;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Run a store-touching call on the blocking pool. File-backed stores
/// rewrite the whole store file on each mutation.
pub(crate) async fn with_store<S, T, F>(shared: &Arc<S>, f: F) -> Result<T, ApiError>
where
    S: Send + Sync + 'static,
    F: FnOnce(&S) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking({
        let shared = Arc::clone(shared);
        move || f(&shared)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))
}

fn parse_collection(name: &str) -> Result<Collection, ApiError> {
    name.parse::<Collection>().map_err(|e| ApiError::NotFound(e.to_string()))
}

fn to_json<T: Serialize>(items: Vec<T>) -> Result<Json<Value>, ApiError> {
    serde_json::to_value(items).map(Json).map_err(|e| ApiError::Internal(e.to_string()))
}

/// Decode a request body as a list of records and validate each one.
fn decode<T, F>(body: Value, validate: F) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Result<(), ModelError>,
{
    let items: Vec<T> = serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    for (idx, item) in items.iter().enumerate() {
        validate(item).map_err(|e| ApiError::BadRequest(format!("item {idx}: {e}")))?;
    }
    Ok(items)
}

pub async fn get_collection(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let collection = parse_collection(&name)?;
    with_store(&state.store, move |store| match collection {
        Collection::Roster => to_json(store.load_roster()),
        Collection::MedicalFiles => to_json(store.load_medical_files()),
        Collection::TeamMembers => to_json(store.load_team_members()),
        Collection::Planning => to_json(store.load_planning()),
        Collection::Checklist => to_json(store.load_checklist()),
    })
    .await?
}

/// Replace a whole collection with the request body.
pub async fn put_collection(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let collection = parse_collection(&name)?;
    let count = match collection {
        Collection::Roster => {
            let items = decode(body, models::Participant::validate)?;
            let count = items.len();
            with_store(&state.store, move |store| store.save_roster(&items)).await?;
            count
        }
        Collection::MedicalFiles => {
            let items = decode(body, models::MedicalFile::validate)?;
            let count = items.len();
            with_store(&state.store, move |store| store.save_medical_files(&items)).await?;
            count
        }
        Collection::TeamMembers => {
            let items = decode(body, models::TeamMember::validate)?;
            let count = items.len();
            with_store(&state.store, move |store| store.save_team_members(&items)).await?;
            count
        }
        Collection::Planning => {
            let items = decode(body, models::PlanningItem::validate)?;
            let count = items.len();
            with_store(&state.store, move |store| store.save_planning(&items)).await?;
            count
        }
        Collection::Checklist => {
            let items = decode(body, models::ChecklistItem::validate)?;
            let count = items.len();
            with_store(&state.store, move |store| store.save_checklist(&items)).await?;
            count
        }
    };
    info!(%collection, count, "collection saved");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_collection(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let collection = parse_collection(&name)?;
    with_store(&state.store, move |store| store.remove(store.keys().for_collection(collection))).await?;
    info!(%collection, "collection removed");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_store(State(state): State<ServerState>) -> Result<StatusCode, ApiError> {
    with_store(&state.store, |store| store.clear()).await?;
    info!("store cleared");
    Ok(StatusCode::NO_CONTENT)
}
