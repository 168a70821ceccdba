use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{require_non_empty, ModelError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub relationship: String,
}

/// Medical file ("fiche sanitaire") attached to one participant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalFile {
    pub id: Uuid,
    pub participant_id: Uuid,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub treatments: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default)]
    pub vaccinations_up_to_date: bool,
    #[serde(default)]
    pub notes: String,
}

impl MedicalFile {
    pub fn new(participant_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            participant_id,
            allergies: Vec::new(),
            treatments: Vec::new(),
            dietary_restrictions: Vec::new(),
            emergency_contact: None,
            vaccinations_up_to_date: false,
            notes: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(contact) = &self.emergency_contact {
            require_non_empty("emergencyContact.name", &contact.name)?;
            require_non_empty("emergencyContact.phone", &contact.phone)?;
        }
        Ok(())
    }
}
