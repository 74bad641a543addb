//! window.localStorage backend.
//! Synchronous, origin-scoped, persistent across page reloads. Writes
//! fail once the origin's quota is exhausted; callers treat that as
//! non-fatal and keep their in-memory state.

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use neromax_core::ports::StoragePort;
use neromax_types::{ChatError, Result};

pub struct LocalStorage {
    store: Storage,
}

impl LocalStorage {
    /// Bind to the window's localStorage area.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;
        let store = window
            .local_storage()
            .map_err(|e| ChatError::Storage(js_error(&e)))?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;
        Ok(Self { store })
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.store
            .get_item(key)
            .map_err(|e| ChatError::Storage(js_error(&e)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        // Surfaces QuotaExceededError among others
        self.store
            .set_item(key, value)
            .map_err(|e| ChatError::Storage(js_error(&e)))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.store
            .remove_item(key)
            .map_err(|e| ChatError::Storage(js_error(&e)))
    }

    fn backend_name(&self) -> &str {
        "localstorage"
    }
}

fn js_error(value: &JsValue) -> String {
    format!("{:?}", value)
}
