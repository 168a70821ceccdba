//! Domain records kept in the camp admin store.
//!
//! Every collection is persisted as a JSON array of one of these records.
//! Field names are camelCase on the wire so the browser UI can read them
//! as-is. Unknown optional fields default, so older saved data still loads.

pub mod errors;
pub mod participant;
pub mod medical;
pub mod team;
pub mod planning;
pub mod checklist;

pub use checklist::ChecklistItem;
pub use medical::{EmergencyContact, MedicalFile};
pub use participant::Participant;
pub use planning::PlanningItem;
pub use team::{DocumentStatus, TeamDocument, TeamMember};
