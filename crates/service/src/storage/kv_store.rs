use std::sync::Arc;

use models::{ChecklistItem, MedicalFile, Participant, PlanningItem, TeamMember};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

use super::backend::StorageBackend;
use super::keys::StorageKeys;
use crate::errors::StorageError;

/// Typed, total facade over a `StorageBackend`.
///
/// No method returns an error: failed writes are dropped, failed or corrupt
/// reads look exactly like missing data. Each absorbed failure produces one
/// ERROR event carrying the operation and key.
pub struct KvStore {
    backend: Arc<dyn StorageBackend>,
    keys: StorageKeys,
}

impl KvStore {
    pub fn new(backend: Arc<dyn StorageBackend>, keys: StorageKeys) -> Self {
        Self { backend, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Serialize `value` and write it under `key`, replacing what was there.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => return absorb("save", key, &e.into()),
        };
        if let Err(e) = self.backend.set_item(key, &text) {
            absorb("save", key, &e);
        }
    }

    /// Read and decode `key`. Absent, unreadable and corrupt all give `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.load_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                absorb("load", key, &e.into());
                None
            }
        }
    }

    /// Raw stored text for `key`, without decoding.
    pub fn load_raw(&self, key: &str) -> Option<String> {
        match self.backend.get_item(key) {
            Ok(raw) => raw,
            Err(e) => {
                absorb("load", key, &e);
                None
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.load_raw(key).is_some()
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            absorb("remove", key, &e);
        }
    }

    /// Delete every entry in the backend, reserved or not.
    pub fn clear(&self) {
        if let Err(e) = self.backend.clear() {
            absorb("clear", "*", &e);
        }
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.load::<Vec<T>>(key).unwrap_or_default()
    }

    pub fn save_roster(&self, roster: &[Participant]) {
        self.save(&self.keys.roster, roster)
    }

    pub fn load_roster(&self) -> Vec<Participant> {
        self.load_collection(&self.keys.roster)
    }

    pub fn save_medical_files(&self, files: &[MedicalFile]) {
        self.save(&self.keys.medical_files, files)
    }

    pub fn load_medical_files(&self) -> Vec<MedicalFile> {
        self.load_collection(&self.keys.medical_files)
    }

    pub fn save_team_members(&self, members: &[TeamMember]) {
        self.save(&self.keys.team_members, members)
    }

    pub fn load_team_members(&self) -> Vec<TeamMember> {
        self.load_collection(&self.keys.team_members)
    }

    pub fn save_planning(&self, items: &[PlanningItem]) {
        self.save(&self.keys.planning, items)
    }

    pub fn load_planning(&self) -> Vec<PlanningItem> {
        self.load_collection(&self.keys.planning)
    }

    pub fn save_checklist(&self, items: &[ChecklistItem]) {
        self.save(&self.keys.checklist, items)
    }

    pub fn load_checklist(&self) -> Vec<ChecklistItem> {
        self.load_collection(&self.keys.checklist)
    }
}

fn absorb(op: &'static str, key: &str, err: &StorageError) {
    error!(op, key, error = %err, "storage operation failed");
    common::metrics::record_storage_failure(op);
}
