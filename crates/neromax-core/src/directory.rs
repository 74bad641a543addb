//! Ordered session list for one user identity.
//!
//! Owns the reconciliation rules: title derivation from the first user
//! message, prepend-on-create, in-place update, reuse of an untouched
//! "New Chat" entry, and replacement of the active session on delete.

use neromax_types::{
    event::ChatEvent,
    message::{Message, Role},
    session::{Session, DEFAULT_TITLE},
};

use crate::event_bus::EventBus;
use crate::keys;
use crate::ports::{IdSource, StoragePort};

/// Sidebar titles keep at most this many characters of the first
/// user message.
pub const TITLE_MAX_CHARS: usize = 30;

pub struct SessionDirectory {
    user_id: String,
    sessions: Vec<Session>,
    event_bus: EventBus,
}

impl SessionDirectory {
    pub fn new(user_id: impl Into<String>, event_bus: EventBus) -> Self {
        Self {
            user_id: user_id.into(),
            sessions: Vec::new(),
            event_bus,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Sessions in display order, most recent first
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Load the stored directory. Absent or malformed data means empty.
    pub async fn load(&mut self, storage: &dyn StoragePort) {
        let key = keys::directory(&self.user_id);
        self.sessions = match storage.get(&key).await {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Discarding malformed session list: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read session list: {}", e);
                Vec::new()
            }
        };
    }

    /// The session id a send should target: the current selection when
    /// there is one, otherwise a freshly minted id. A minted id gets no
    /// directory entry until the first message persists (see
    /// `upsert_from_log`).
    pub fn ensure_active(&self, selected: Option<&str>, ids: &dyn IdSource) -> String {
        match selected {
            Some(id) => id.to_string(),
            None => ids.next_id(),
        }
    }

    /// Title shown in the sidebar: prefix of the first user message,
    /// or the default while none exists.
    pub fn derive_title(messages: &[Message]) -> String {
        messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.chars().take(TITLE_MAX_CHARS).collect())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Bring the entry for `session_id` in line with its log content:
    /// update the title in place, or prepend a new entry if absent.
    /// Idempotent for an unchanged message sequence.
    pub async fn upsert_from_log(
        &mut self,
        session_id: &str,
        messages: &[Message],
        storage: &dyn StoragePort,
    ) {
        let title = Self::derive_title(messages);
        match self.sessions.iter_mut().find(|s| s.id == session_id) {
            Some(existing) => existing.title = title,
            None => {
                let mut session = Session::new(session_id.to_string());
                session.title = title;
                self.sessions.insert(0, session);
                self.event_bus.emit(ChatEvent::SessionCreated {
                    id: session_id.to_string(),
                });
            }
        }
        self.persist(storage).await;
    }

    /// Start a new chat. Reuses an existing "New Chat" entry that has no
    /// stored history yet, so empty sessions do not pile up; otherwise
    /// prepends a fresh one. Returns the id to select.
    pub async fn create_empty(
        &mut self,
        storage: &dyn StoragePort,
        ids: &dyn IdSource,
    ) -> String {
        if let Some(id) = self.find_untouched(storage).await {
            return id;
        }

        let session = Session::new(ids.next_id());
        let id = session.id.clone();
        self.sessions.insert(0, session);
        self.persist(storage).await;
        self.event_bus.emit(ChatEvent::SessionCreated { id: id.clone() });
        id
    }

    /// First entry still titled "New Chat" with no persisted messages.
    /// A read error disqualifies the candidate rather than reusing a
    /// session whose history may exist.
    async fn find_untouched(&self, storage: &dyn StoragePort) -> Option<String> {
        for session in &self.sessions {
            if session.title != DEFAULT_TITLE {
                continue;
            }
            let key = keys::history(&self.user_id, &session.id);
            if matches!(storage.get(&key).await, Ok(None)) {
                return Some(session.id.clone());
            }
        }
        None
    }

    /// Remove a session and discard its stored history. The caller has
    /// already confirmed the delete. When the removed session was the
    /// active one, a replacement is created immediately and its id
    /// returned — the directory is never left pointing at a session
    /// that no longer exists.
    pub async fn delete(
        &mut self,
        session_id: &str,
        active: Option<&str>,
        storage: &dyn StoragePort,
        ids: &dyn IdSource,
    ) -> Option<String> {
        self.sessions.retain(|s| s.id != session_id);
        self.persist(storage).await;

        let history = keys::history(&self.user_id, session_id);
        if let Err(e) = storage.remove(&history).await {
            self.warn(format!(
                "Could not remove history for {}: {}",
                session_id, e
            ));
        }
        self.event_bus.emit(ChatEvent::SessionDeleted {
            id: session_id.to_string(),
        });

        if active == Some(session_id) {
            Some(self.create_empty(storage, ids).await)
        } else {
            None
        }
    }

    /// Best-effort write of the whole directory. On failure the
    /// in-memory state stays ahead of storage; the UI gets a warning
    /// event, not an interrupted flow.
    async fn persist(&self, storage: &dyn StoragePort) {
        let key = keys::directory(&self.user_id);
        let json = match serde_json::to_string(&self.sessions) {
            Ok(json) => json,
            Err(e) => {
                self.warn(format!("Could not encode session list: {}", e));
                return;
            }
        };
        if let Err(e) = storage.set(&key, &json).await {
            self.warn(format!("Could not save session list: {}", e));
        }
    }

    fn warn(&self, message: String) {
        log::warn!("{}", message);
        self.event_bus.emit(ChatEvent::StorageWarning { message });
    }
}
