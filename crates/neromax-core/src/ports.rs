//! Port traits — the boundary between the chat core and the browser.
//!
//! These traits are defined here in `neromax-core` (pure Rust).
//! Implementations live in `neromax-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use neromax_types::Result;

// ─── Storage Port ────────────────────────────────────────────

/// Origin-scoped key-value store. Values are JSON strings.
/// Absence of a key is a valid state meaning "empty", not an error.
#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value, overwriting any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value
    async fn remove(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Completion Port ─────────────────────────────────────────

/// Request to the chat-completion API
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub content: String,
}

/// Successful reply from the chat-completion API
#[derive(Debug, Clone)]
pub struct PromptReply {
    pub reply: String,
}

/// Remote chat-completion collaborator. The core treats every
/// non-success outcome as a uniform failure; it does not distinguish
/// status codes.
#[async_trait(?Send)]
pub trait CompletionPort {
    async fn complete(&self, req: PromptRequest) -> Result<PromptReply>;
}

// ─── Id Source ───────────────────────────────────────────────

/// Mints opaque session ids. Injected so tests can supply
/// deterministic ids; any collision-resistant scheme works, as long as
/// two calls never return the same id.
pub trait IdSource {
    fn next_id(&self) -> String;
}
