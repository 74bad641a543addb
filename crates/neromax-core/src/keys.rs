//! Storage key scheme shared by the directory and the conversation log.
//!
//! Key names (including the historical "promt" spelling) are fixed by
//! the deployed storage schema; changing them would orphan existing
//! users' sessions.

/// Ordered session list for one user
pub fn directory(user_id: &str) -> String {
    format!("sessions_{}", user_id)
}

/// Message sequence for one (user, session) pair
pub fn history(user_id: &str, session_id: &str) -> String {
    format!("promtHistory_{}_{}", user_id, session_id)
}
