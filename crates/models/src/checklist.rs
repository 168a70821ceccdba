use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{require_non_empty, ModelError};

/// An administrative to-do before or during the stay.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: Uuid,
    pub label: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_at: Option<DateTime<Utc>>,
}

impl ChecklistItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), label: label.into(), done: false, done_at: None }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require_non_empty("label", &self.label)
    }
}
