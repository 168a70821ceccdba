use std::fmt;
use std::str::FromStr;

/// Reserved storage keys, one per logical collection plus the delivery
/// configuration. Built once at startup and handed to `KvStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub roster: String,
    pub medical_files: String,
    pub team_members: String,
    pub planning: String,
    pub checklist: String,
    pub delivery_config: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            roster: "jeunes".into(),
            medical_files: "fichesSanitaires".into(),
            team_members: "equipe".into(),
            planning: "planningData".into(),
            checklist: "adminChecklist".into(),
            delivery_config: "emailjsConfig".into(),
        }
    }
}

impl StorageKeys {
    pub fn for_collection(&self, collection: Collection) -> &str {
        match collection {
            Collection::Roster => &self.roster,
            Collection::MedicalFiles => &self.medical_files,
            Collection::TeamMembers => &self.team_members,
            Collection::Planning => &self.planning,
            Collection::Checklist => &self.checklist,
        }
    }

    /// Every reserved key, collections first.
    pub fn all(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Collection::ALL.iter().map(|c| self.for_collection(*c)).collect();
        keys.push(&self.delivery_config);
        keys
    }
}

/// The stored collections, named the way the HTTP API addresses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Roster,
    MedicalFiles,
    TeamMembers,
    Planning,
    Checklist,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Roster,
        Collection::MedicalFiles,
        Collection::TeamMembers,
        Collection::Planning,
        Collection::Checklist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Roster => "roster",
            Collection::MedicalFiles => "medical-files",
            Collection::TeamMembers => "team-members",
            Collection::Planning => "planning",
            Collection::Checklist => "checklist",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCollection(pub String);

impl fmt::Display for UnknownCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown collection: {}", self.0)
    }
}

impl std::error::Error for UnknownCollection {}

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}
