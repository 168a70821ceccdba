use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{require_non_empty, ModelError};

/// One row of the activity planning table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanningItem {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    pub activity: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub team_member_ids: Vec<Uuid>,
    #[serde(default)]
    pub participant_ids: Vec<Uuid>,
    #[serde(default)]
    pub notes: String,
}

impl PlanningItem {
    pub fn new(date: NaiveDate, activity: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            start_time: None,
            end_time: None,
            activity: activity.into(),
            location: String::new(),
            team_member_ids: Vec::new(),
            participant_ids: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require_non_empty("activity", &self.activity)?;
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if end < start {
                return Err(ModelError::Validation("endTime must not be before startTime".into()));
            }
        }
        Ok(())
    }
}
