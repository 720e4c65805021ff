//! Conversation assembly.
//!
//! The widget sends loosely-typed history entries; everything is coerced
//! here, at the boundary, so the rest of the crate only sees well-formed
//! [`ChatMessage`] values. The conversation sent upstream is always one
//! system message, at most [`HISTORY_WINDOW`] history messages, and one
//! trailing user message.

use serde_json::Value;

use crate::config::ChatConfig;
use crate::llm::prompts::DEFAULT_SYSTEM_PROMPT;
use crate::models::{ChatMessage, Role};

/// Number of trailing history entries retained per request.
pub const HISTORY_WINDOW: usize = 6;

/// Coerce one raw history entry into a [`ChatMessage`].
///
/// Only a literal `"assistant"` role survives; every other role value
/// becomes `"user"`. Content is kept as-is when it is a string, defaults
/// to empty when absent or null, and falls back to the JSON text of the
/// value otherwise.
fn sanitize_entry(entry: &Value) -> ChatMessage {
    let role = match entry.get("role").and_then(Value::as_str) {
        Some("assistant") => Role::Assistant,
        _ => Role::User,
    };

    let content = match entry.get("content") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    ChatMessage { role, content }
}

/// Sanitize a raw `history` value into at most [`HISTORY_WINDOW`] messages.
///
/// A non-array value (including absence) yields the empty list. The window
/// is the tail of the supplied array with relative order preserved.
pub fn sanitize_history(history: Option<&Value>) -> Vec<ChatMessage> {
    let Some(entries) = history.and_then(Value::as_array) else {
        return Vec::new();
    };

    let start = entries.len().saturating_sub(HISTORY_WINDOW);
    entries[start..].iter().map(sanitize_entry).collect()
}

/// Build the full conversation for one request:
/// system prompt, sanitized history window, then the new user message.
pub fn build_conversation(
    config: &ChatConfig,
    message: &str,
    history: Option<&Value>,
) -> Vec<ChatMessage> {
    let system_prompt = config
        .system_prompt
        .as_deref()
        .unwrap_or(DEFAULT_SYSTEM_PROMPT);

    let mut messages = Vec::with_capacity(HISTORY_WINDOW + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(sanitize_history(history));
    messages.push(ChatMessage::user(message));
    messages
}
