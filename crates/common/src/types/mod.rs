use serde::Serialize;

/// Body of the `/health` endpoint.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of `/api/notify/status`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfiguredStatus {
    pub configured: bool,
}
