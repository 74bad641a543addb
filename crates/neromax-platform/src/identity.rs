//! Current-user identity, read from the shared storage area.
//!
//! The signup/login screens (outside this workspace) leave the user
//! object under "user" and the bearer credential under "token". Both
//! are opaque to the chat core; this module only extracts the fields
//! the client needs.

use serde::Deserialize;

use neromax_core::ports::StoragePort;
use neromax_types::{ChatError, Result};

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "token";

/// The signed-in user as the chat client sees it
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub first_name: Option<String>,
    pub token: String,
}

#[derive(Deserialize)]
struct StoredUser {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "firstName", default)]
    first_name: Option<String>,
}

impl CurrentUser {
    /// Load the signed-in user, or None when nobody is signed in.
    pub async fn load(storage: &dyn StoragePort) -> Result<Option<Self>> {
        let raw = match storage.get(USER_KEY).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let user: StoredUser = serde_json::from_str(&raw)
            .map_err(|e| ChatError::Identity(format!("Malformed user record: {}", e)))?;
        let token = storage.get(TOKEN_KEY).await?.unwrap_or_default();
        Ok(Some(Self {
            id: user.id,
            first_name: user.first_name,
            token,
        }))
    }

    /// Local sign-out: drop the stored user and credential. Remote
    /// session teardown belongs to the auth screens.
    pub async fn clear(storage: &dyn StoragePort) -> Result<()> {
        storage.remove(USER_KEY).await?;
        storage.remove(TOKEN_KEY).await?;
        Ok(())
    }
}
