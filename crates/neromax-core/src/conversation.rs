//! Ordered message sequence for one session.
//!
//! Owns append + persist, and notifies the session directory after
//! every change so the sidebar entry stays consistent with the log.

use neromax_types::{event::ChatEvent, message::Message};

use crate::directory::SessionDirectory;
use crate::event_bus::EventBus;
use crate::keys;
use crate::ports::{CompletionPort, PromptRequest, StoragePort};

/// Appended in place of a reply when the completion call fails.
/// A sent user message is never left unanswered.
pub const FALLBACK_REPLY: &str = "Something went wrong with AI response.";

/// Lifecycle of a send: `Idle -> Sending -> Idle`. Exposed so the UI
/// can show a loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending,
}

pub struct ConversationLog {
    user_id: String,
    session_id: String,
    messages: Vec<Message>,
    pub state: SendState,
    event_bus: EventBus,
}

impl ConversationLog {
    pub fn new(
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            messages: Vec::new(),
            state: SendState::Idle,
            event_bus,
        }
    }

    /// The session this log appends to. Fixed at construction: a
    /// completion that resolves after the user navigated away still
    /// lands in the session that issued the send.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Load the persisted sequence. Absent or malformed data means
    /// empty; previously persisted messages are never lost to a read
    /// problem elsewhere.
    pub async fn load(&mut self, storage: &dyn StoragePort) {
        let key = keys::history(&self.user_id, &self.session_id);
        self.messages = match storage.get(&key).await {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!(
                    "Discarding malformed history for {}: {}",
                    self.session_id,
                    e
                );
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read history for {}: {}", self.session_id, e);
                Vec::new()
            }
        };
    }

    /// Append one message, rewrite the whole stored sequence, then
    /// bring the directory entry in line with the new content.
    pub async fn append(
        &mut self,
        message: Message,
        storage: &dyn StoragePort,
        directory: &mut SessionDirectory,
    ) -> &[Message] {
        self.messages.push(message);
        self.persist(storage).await;
        directory
            .upsert_from_log(&self.session_id, &self.messages, storage)
            .await;
        &self.messages
    }

    /// Send a user message and wait for the assistant's reply.
    ///
    /// Whitespace-only input is a no-op: nothing is appended and the
    /// completion API is not contacted. Otherwise the user message is
    /// appended optimistically; a completion failure appends the fixed
    /// fallback reply instead of surfacing an error.
    pub async fn send_user_message(
        &mut self,
        content: &str,
        completion: &dyn CompletionPort,
        storage: &dyn StoragePort,
        directory: &mut SessionDirectory,
    ) -> Option<Message> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.state = SendState::Sending;
        self.event_bus.emit(ChatEvent::SendStart {
            session_id: self.session_id.clone(),
        });
        self.append(Message::user(trimmed), storage, directory).await;

        let request = PromptRequest {
            content: trimmed.to_string(),
        };
        let reply = match completion.complete(request).await {
            Ok(resp) => Message::assistant(resp.reply),
            Err(e) => {
                log::warn!("Completion failed for {}: {}", self.session_id, e);
                Message::assistant(FALLBACK_REPLY)
            }
        };
        self.append(reply.clone(), storage, directory).await;

        self.state = SendState::Idle;
        self.event_bus.emit(ChatEvent::ReplyReceived {
            session_id: self.session_id.clone(),
        });
        Some(reply)
    }

    /// Best-effort write. Same degradation as the directory: warn the
    /// UI and keep going with the in-memory sequence.
    async fn persist(&self, storage: &dyn StoragePort) {
        let key = keys::history(&self.user_id, &self.session_id);
        let json = match serde_json::to_string(&self.messages) {
            Ok(json) => json,
            Err(e) => {
                self.warn(format!(
                    "Could not encode history for {}: {}",
                    self.session_id, e
                ));
                return;
            }
        };
        if let Err(e) = storage.set(&key, &json).await {
            self.warn(format!(
                "Could not save history for {}: {}",
                self.session_id, e
            ));
        }
    }

    fn warn(&self, message: String) {
        log::warn!("{}", message);
        self.event_bus.emit(ChatEvent::StorageWarning { message });
    }
}
