//! Chat workflows behind the conversation and sidebar screens.
//!
//! `ChatApp` holds the active selection and replays the screens'
//! control flow: select a session, start a new chat, send a message,
//! delete a chat. Rendering and delete confirmation stay with the
//! embedding UI.

use std::rc::Rc;

use neromax_core::conversation::{ConversationLog, SendState};
use neromax_core::directory::SessionDirectory;
use neromax_core::event_bus::EventBus;
use neromax_core::ports::{CompletionPort, IdSource, StoragePort};
use neromax_platform::api::HttpCompletion;
use neromax_platform::identity::CurrentUser;
use neromax_platform::ids::ClockIds;
use neromax_platform::storage::open_storage;
use neromax_types::config::ClientConfig;
use neromax_types::event::ChatEvent;
use neromax_types::message::Message;
use neromax_types::session::Session;
use neromax_types::{ChatError, Result};

/// Assemble the client against the browser: storage per config,
/// identity from storage, HTTP completion with the stored credential.
pub async fn bootstrap(config: ClientConfig) -> Result<ChatApp> {
    let storage = open_storage(&config.storage.backend);
    let user = CurrentUser::load(storage.as_ref())
        .await?
        .ok_or_else(|| ChatError::Identity("No signed-in user".to_string()))?;
    let completion = Rc::new(HttpCompletion::new(&config.api, &user.token));
    Ok(ChatApp::new(user, storage, completion, Box::new(ClockIds::new())).await)
}

pub struct ChatApp {
    user: CurrentUser,
    storage: Rc<dyn StoragePort>,
    completion: Rc<dyn CompletionPort>,
    ids: Box<dyn IdSource>,
    event_bus: EventBus,
    directory: SessionDirectory,
    log: Option<ConversationLog>,
    selected: Option<String>,
}

impl ChatApp {
    pub async fn new(
        user: CurrentUser,
        storage: Rc<dyn StoragePort>,
        completion: Rc<dyn CompletionPort>,
        ids: Box<dyn IdSource>,
    ) -> Self {
        let event_bus = EventBus::new();
        let mut directory = SessionDirectory::new(user.id.clone(), event_bus.clone());
        directory.load(storage.as_ref()).await;

        Self {
            user,
            storage,
            completion,
            ids,
            event_bus,
            directory,
            log: None,
            selected: None,
        }
    }

    /// Event stream for the embedding UI to drain
    pub fn events(&self) -> &EventBus {
        &self.event_bus
    }

    /// Sessions in sidebar order
    pub fn sessions(&self) -> &[Session] {
        self.directory.sessions()
    }

    pub fn selected_session(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Messages of the conversation currently on screen
    pub fn messages(&self) -> &[Message] {
        self.log.as_ref().map(ConversationLog::messages).unwrap_or(&[])
    }

    /// Whether a send is outstanding (loading indicator)
    pub fn is_sending(&self) -> bool {
        self.log
            .as_ref()
            .is_some_and(|log| log.state == SendState::Sending)
    }

    /// Sidebar footer label
    pub fn display_name(&self) -> &str {
        self.user.first_name.as_deref().unwrap_or("My Profile")
    }

    /// Switch the conversation view to `session_id` and reload its
    /// history.
    pub async fn select_session(&mut self, session_id: &str) {
        let mut log =
            ConversationLog::new(&self.user.id, session_id, self.event_bus.clone());
        log.load(self.storage.as_ref()).await;
        self.log = Some(log);
        self.selected = Some(session_id.to_string());
        self.event_bus.emit(ChatEvent::SessionSelected {
            id: session_id.to_string(),
        });
    }

    /// Start a new chat and select it
    pub async fn new_chat(&mut self) -> String {
        let id = self
            .directory
            .create_empty(self.storage.as_ref(), &*self.ids)
            .await;
        self.select_session(&id).await;
        id
    }

    /// Send `content` in the active session, minting a session id first
    /// when nothing is selected. The session only appears in the
    /// sidebar once the first message persists. Returns the assistant
    /// reply, or None for whitespace-only input.
    pub async fn send_message(&mut self, content: &str) -> Option<Message> {
        let session_id = self
            .directory
            .ensure_active(self.selected.as_deref(), &*self.ids);

        let stale = match &self.log {
            Some(log) => log.session_id() != session_id,
            None => true,
        };
        if stale {
            let mut log =
                ConversationLog::new(&self.user.id, session_id.clone(), self.event_bus.clone());
            log.load(self.storage.as_ref()).await;
            self.log = Some(log);
        }

        let log = self.log.as_mut()?;
        let reply = log
            .send_user_message(
                content,
                self.completion.as_ref(),
                self.storage.as_ref(),
                &mut self.directory,
            )
            .await;

        // A lazily created session becomes the selection once it holds
        // a message
        if reply.is_some() && self.selected.as_deref() != Some(session_id.as_str()) {
            self.selected = Some(session_id.clone());
            self.event_bus
                .emit(ChatEvent::SessionSelected { id: session_id });
        }
        reply
    }

    /// Delete a chat and its history. The embedding UI has already
    /// asked the user to confirm. Deleting the active chat selects the
    /// replacement immediately.
    pub async fn delete_session(&mut self, session_id: &str) {
        if self
            .log
            .as_ref()
            .is_some_and(|log| log.session_id() == session_id)
        {
            self.log = None;
        }

        let replacement = self
            .directory
            .delete(
                session_id,
                self.selected.as_deref(),
                self.storage.as_ref(),
                &*self.ids,
            )
            .await;

        if let Some(id) = replacement {
            self.select_session(&id).await;
        }
    }

    /// Local sign-out; the auth screens own the remote teardown.
    pub async fn sign_out(&self) -> Result<()> {
        CurrentUser::clear(self.storage.as_ref()).await
    }
}
