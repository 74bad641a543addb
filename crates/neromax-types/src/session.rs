use serde::{Deserialize, Serialize};

/// Title a session carries before any user message exists
pub const DEFAULT_TITLE: &str = "New Chat";

/// One conversation thread as listed in the per-user directory.
/// The message sequence is stored separately under its own key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    /// RFC 3339. The storage schema uses the camelCase key.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Session {
    pub fn new(id: String) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
