use serde::{Deserialize, Serialize};

/// Text used when an event names nobody.
pub const NO_PERSONS_PLACEHOLDER: &str = "Aucune personne spécifiée";

/// What the UI submits for one incident/event entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default, rename = "jeunes", alias = "participants")]
    pub participants: Vec<String>,
}

impl EventData {
    /// One bulleted line per person, team first, or the placeholder.
    pub fn persons_involved(&self) -> String {
        let lines: Vec<String> = self
            .team_members
            .iter()
            .map(|name| format!("• {name} (équipe)"))
            .chain(self.participants.iter().map(|name| format!("• {name} (jeune)")))
            .collect();
        if lines.is_empty() {
            return NO_PERSONS_PLACEHOLDER.to_string();
        }
        lines.join("\n")
    }

    pub fn subject(&self) -> String {
        format!("Main courante - Événement du {} à {}", self.date, self.time)
    }
}

/// Parameters handed to the email template.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateParams {
    pub to_email: String,
    pub event_date: String,
    pub event_time: String,
    pub description: String,
    pub persons_involved: String,
    pub subject: String,
}

impl TemplateParams {
    pub fn build(recipient: &str, event: &EventData) -> Self {
        Self {
            to_email: recipient.to_string(),
            event_date: event.date.clone(),
            event_time: event.time.clone(),
            description: event.description.clone(),
            persons_involved: event.persons_involved(),
            subject: event.subject(),
        }
    }
}
