//! Upstream chat-completion client.
//!
//! One synchronous call per request, no retries: every failure is terminal
//! and surfaced to the handler, which answers with the fallback reply.

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::Serialize;
use serde_json::Value;

use crate::config::{ChatConfig, TEMPERATURE};
use crate::error::{CarelineError, Result};
use crate::models::ChatMessage;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: &'a [ChatMessage],
}

#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    model: String,
    api_key: Option<String>,
    base_url: String,
    max_tokens: u32,
}

impl CompletionClient {
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CarelineError::Upstream(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Send the assembled conversation upstream.
    ///
    /// Returns `Ok(Some(content))` when the first choice carries text,
    /// `Ok(None)` when the upstream answered 2xx without usable content
    /// (an extraction miss, not a failure), and `Err` on a non-success
    /// status, network error, or unparsable body.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>> {
        let request = CompletionRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            max_tokens: self.max_tokens,
            messages,
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(ref api_key) = self.api_key {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {api_key}"))
                    .map_err(|e| CarelineError::Upstream(format!("Invalid API key header: {e}")))?,
            );
        }

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| CarelineError::Upstream(format!("Completion request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CarelineError::Upstream(format!(
                "Completion API error {status}: {body}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CarelineError::Upstream(format!("Failed to parse response: {e}")))?;

        Ok(Self::extract_content(&body))
    }

    /// Pull `choices[0].message.content` out of a completion response body.
    fn extract_content(body: &Value) -> Option<String> {
        let content = body
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()?;

        if content.is_empty() {
            return None;
        }
        Some(content.to_string())
    }
}
