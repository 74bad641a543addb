use serde::{Deserialize, Serialize};

/// Events published by the chat core.
/// The embedding UI drains these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A send was issued for this session
    SendStart { session_id: String },

    /// The assistant reply (or the fallback) was appended
    ReplyReceived { session_id: String },

    /// A new entry was added to the session directory
    SessionCreated { id: String },

    /// The active session changed
    SessionSelected { id: String },

    /// A session and its stored history were removed
    SessionDeleted { id: String },

    /// A persistence write failed; in-memory state is still current
    StorageWarning { message: String },
}
