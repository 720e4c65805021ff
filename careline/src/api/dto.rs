//! Chat request/response DTOs.
//!
//! The chat endpoint deliberately parses its body as loose JSON (the
//! widget's history entries carry untrusted shapes), so [`ChatRequest`]
//! documents the contract for the OpenAPI surface rather than driving
//! deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /v1/chat`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ChatRequest {
    /// The visitor's new message. Required, non-empty.
    pub message: String,
    /// Prior turns, oldest first. Only the last 6 entries are used; roles
    /// other than `"assistant"` are treated as `"user"`.
    #[schema(value_type = Option<Vec<Object>>)]
    pub history: Option<Value>,
}

/// Success (and fallback) body for `POST /v1/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChatReply {
    /// Assistant text for the widget to render.
    pub reply: String,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChatError {
    /// Machine-readable description of what was wrong with the request.
    pub error: String,
}
