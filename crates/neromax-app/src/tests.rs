#[cfg(test)]
mod tests {
    use crate::ChatApp;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use neromax_core::conversation::FALLBACK_REPLY;
    use neromax_core::ports::{CompletionPort, IdSource, PromptReply, PromptRequest, StoragePort};
    use neromax_platform::identity::CurrentUser;
    use neromax_platform::storage::MemoryStorage;
    use neromax_types::event::ChatEvent;
    use neromax_types::message::Role;
    use neromax_types::session::DEFAULT_TITLE;
    use neromax_types::{ChatError, Result};
    use std::cell::Cell;
    use std::rc::Rc;

    // ─── Mock Ports ──────────────────────────────────────────

    struct EchoCompletion;

    #[async_trait(?Send)]
    impl CompletionPort for EchoCompletion {
        async fn complete(&self, req: PromptRequest) -> Result<PromptReply> {
            Ok(PromptReply {
                reply: format!("echo: {}", req.content),
            })
        }
    }

    struct FailingCompletion;

    #[async_trait(?Send)]
    impl CompletionPort for FailingCompletion {
        async fn complete(&self, _req: PromptRequest) -> Result<PromptReply> {
            Err(ChatError::Network("connection refused".to_string()))
        }
    }

    struct SeqIds {
        next: Cell<u64>,
    }

    impl SeqIds {
        fn new() -> Self {
            Self { next: Cell::new(0) }
        }
    }

    impl IdSource for SeqIds {
        fn next_id(&self) -> String {
            let n = self.next.get();
            self.next.set(n + 1);
            format!("session_{}", 1700000000000u64 + n)
        }
    }

    fn test_user() -> CurrentUser {
        CurrentUser {
            id: "u1".to_string(),
            first_name: Some("Ada".to_string()),
            token: "jwt-abc".to_string(),
        }
    }

    fn make_app(storage: Rc<MemoryStorage>, completion: Rc<dyn CompletionPort>) -> ChatApp {
        block_on(ChatApp::new(
            test_user(),
            storage,
            completion,
            Box::new(SeqIds::new()),
        ))
    }

    // ─── Workflow Tests ──────────────────────────────────────

    #[test]
    fn test_fresh_user_has_no_sessions() {
        let app = make_app(Rc::new(MemoryStorage::new()), Rc::new(EchoCompletion));
        assert!(app.sessions().is_empty());
        assert!(app.selected_session().is_none());
        assert!(app.messages().is_empty());
    }

    #[test]
    fn test_new_chat_creates_and_selects() {
        let mut app = make_app(Rc::new(MemoryStorage::new()), Rc::new(EchoCompletion));

        let id = block_on(app.new_chat());

        assert_eq!(app.sessions().len(), 1);
        assert_eq!(app.sessions()[0].id, id);
        assert_eq!(app.sessions()[0].title, DEFAULT_TITLE);
        assert_eq!(app.selected_session(), Some(id.as_str()));
        assert!(app.messages().is_empty());
    }

    #[test]
    fn test_send_without_selection_mints_and_selects() {
        let mut app = make_app(Rc::new(MemoryStorage::new()), Rc::new(EchoCompletion));

        let reply = block_on(app.send_message("Hi there"));

        assert_eq!(reply.unwrap().content, "echo: Hi there");
        assert_eq!(app.sessions().len(), 1);
        assert_eq!(app.sessions()[0].title, "Hi there");
        assert_eq!(app.selected_session(), Some(app.sessions()[0].id.as_str()));

        let events = app.events().drain();
        assert!(events
            .iter()
            .any(|e| matches!(e, ChatEvent::SessionSelected { .. })));
    }

    #[test]
    fn test_send_appends_user_and_reply() {
        let mut app = make_app(Rc::new(MemoryStorage::new()), Rc::new(EchoCompletion));

        block_on(app.new_chat());
        block_on(app.send_message("Hello"));

        let messages = app.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "echo: Hello");
        assert!(!app.is_sending());
    }

    #[test]
    fn test_send_empty_input_is_noop() {
        let mut app = make_app(Rc::new(MemoryStorage::new()), Rc::new(EchoCompletion));

        let reply = block_on(app.send_message("   "));

        assert!(reply.is_none());
        assert!(app.sessions().is_empty());
        assert!(app.selected_session().is_none());
    }

    #[test]
    fn test_send_failure_shows_fallback() {
        let mut app = make_app(Rc::new(MemoryStorage::new()), Rc::new(FailingCompletion));

        let reply = block_on(app.send_message("Hello"));

        assert_eq!(reply.unwrap().content, FALLBACK_REPLY);
        let messages = app.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, FALLBACK_REPLY);
        // The failed send still names the session in the sidebar
        assert_eq!(app.sessions()[0].title, "Hello");
    }

    #[test]
    fn test_switch_session_reloads_history() {
        let mut app = make_app(Rc::new(MemoryStorage::new()), Rc::new(EchoCompletion));

        block_on(app.send_message("First chat"));
        let first = app.selected_session().unwrap().to_string();

        block_on(app.new_chat());
        block_on(app.send_message("Second chat"));
        assert_eq!(app.messages()[0].content, "Second chat");

        block_on(app.select_session(&first));
        assert_eq!(app.messages().len(), 2);
        assert_eq!(app.messages()[0].content, "First chat");
    }

    #[test]
    fn test_delete_active_selects_replacement() {
        let mut app = make_app(Rc::new(MemoryStorage::new()), Rc::new(EchoCompletion));

        block_on(app.send_message("Hello"));
        let doomed = app.selected_session().unwrap().to_string();

        block_on(app.delete_session(&doomed));

        assert_eq!(app.sessions().len(), 1);
        let replacement = app.sessions()[0].id.clone();
        assert_ne!(replacement, doomed);
        assert_eq!(app.sessions()[0].title, DEFAULT_TITLE);
        assert_eq!(app.selected_session(), Some(replacement.as_str()));
        assert!(app.messages().is_empty());
    }

    #[test]
    fn test_delete_non_active_keeps_selection() {
        let mut app = make_app(Rc::new(MemoryStorage::new()), Rc::new(EchoCompletion));

        block_on(app.send_message("First"));
        let first = app.selected_session().unwrap().to_string();
        block_on(app.new_chat());
        block_on(app.send_message("Second"));
        let second = app.selected_session().unwrap().to_string();

        block_on(app.delete_session(&first));

        assert_eq!(app.sessions().len(), 1);
        assert_eq!(app.selected_session(), Some(second.as_str()));
        assert_eq!(app.messages()[0].content, "Second");
    }

    #[test]
    fn test_sessions_survive_restart() {
        let storage = Rc::new(MemoryStorage::new());
        let mut app = make_app(storage.clone(), Rc::new(EchoCompletion));
        block_on(app.send_message("Remember me"));
        let id = app.selected_session().unwrap().to_string();
        drop(app);

        let mut revived = make_app(storage, Rc::new(EchoCompletion));
        assert_eq!(revived.sessions().len(), 1);
        assert_eq!(revived.sessions()[0].title, "Remember me");

        block_on(revived.select_session(&id));
        assert_eq!(revived.messages().len(), 2);
    }

    #[test]
    fn test_display_name() {
        let app = make_app(Rc::new(MemoryStorage::new()), Rc::new(EchoCompletion));
        assert_eq!(app.display_name(), "Ada");
    }

    #[test]
    fn test_display_name_fallback() {
        let mut user = test_user();
        user.first_name = None;
        let app = block_on(ChatApp::new(
            user,
            Rc::new(MemoryStorage::new()),
            Rc::new(EchoCompletion),
            Box::new(SeqIds::new()),
        ));
        assert_eq!(app.display_name(), "My Profile");
    }

    #[test]
    fn test_sign_out_clears_identity() {
        let storage = Rc::new(MemoryStorage::new());
        block_on(storage.set("user", r#"{"_id":"u1","firstName":"Ada"}"#)).unwrap();
        block_on(storage.set("token", "jwt-abc")).unwrap();

        let app = make_app(storage.clone(), Rc::new(EchoCompletion));
        block_on(app.sign_out()).unwrap();

        assert!(block_on(storage.get("user")).unwrap().is_none());
        assert!(block_on(storage.get("token")).unwrap().is_none());
    }
}
