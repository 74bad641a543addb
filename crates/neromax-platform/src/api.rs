//! HTTP adapter for the chat-completion API.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility. The API
//! takes `{ "content": ... }` with a bearer credential and answers
//! `{ "reply": ... }`. Every non-success outcome maps to one error kind;
//! the conversation log recovers from all of them the same way.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::json;
use web_sys::RequestCredentials;

use neromax_core::ports::{CompletionPort, PromptReply, PromptRequest};
use neromax_types::{config::ApiConfig, ChatError, Result};

pub struct HttpCompletion {
    base_url: String,
    token: String,
}

impl HttpCompletion {
    pub fn new(config: &ApiConfig, token: impl Into<String>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }
}

#[async_trait(?Send)]
impl CompletionPort for HttpCompletion {
    async fn complete(&self, req: PromptRequest) -> Result<PromptReply> {
        // "promt" is the deployed route name
        let url = format!("{}/promt", self.base_url);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.token))
            .credentials(RequestCredentials::Include)
            .json(&json!({ "content": req.content }))
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ChatError::Api(format!("HTTP {}: {}", status, text)));
        }

        let data: ApiReply = response
            .json()
            .await
            .map_err(|e| ChatError::Api(e.to_string()))?;

        Ok(PromptReply { reply: data.reply })
    }
}

#[derive(Deserialize)]
struct ApiReply {
    reply: String,
}
