//! Chat proxy handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::api::dto::{ChatError, ChatReply, ChatRequest};
use crate::api::AppState;
use crate::chat::build_conversation;
use crate::llm::prompts::FALLBACK_REPLY;

fn reply_response(status: StatusCode, reply: impl Into<String>) -> Response {
    (
        status,
        Json(ChatReply {
            reply: reply.into(),
        }),
    )
        .into_response()
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ChatError {
            error: error.into(),
        }),
    )
        .into_response()
}

/// `POST /v1/chat`
///
/// Validates the request, assembles the bounded conversation, relays it
/// upstream once, and always answers with a JSON body. Upstream failures
/// never surface as raw errors; the visitor gets the fallback reply.
#[utoipa::path(
    post,
    path = "/v1/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply (or fallback text on extraction miss)", body = ChatReply),
        (status = 400, description = "Invalid JSON or missing message", body = ChatError),
        (status = 405, description = "Method other than POST/OPTIONS", body = ChatError),
        (status = 502, description = "Upstream completion failure; body carries the fallback reply", body = ChatReply),
    )
)]
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid JSON"),
    };

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty());
    let Some(message) = message else {
        return error_response(StatusCode::BAD_REQUEST, "Missing message");
    };

    let conversation = build_conversation(&state.config.chat, message, body.get("history"));

    match state.llm.complete(&conversation).await {
        Ok(Some(reply)) => reply_response(StatusCode::OK, reply),
        // Upstream answered but produced no usable content. Still a
        // success for the visitor, just with the fallback text.
        Ok(None) => reply_response(StatusCode::OK, FALLBACK_REPLY),
        Err(e) => {
            tracing::error!(error = %e, "Upstream completion failed");
            reply_response(StatusCode::BAD_GATEWAY, FALLBACK_REPLY)
        }
    }
}

/// `OPTIONS /v1/chat`
///
/// CORS preflight. Headers are stamped by the CORS middleware.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::CONTENT_TYPE, "application/json")],
    )
}

/// Fallback for any other method on the chat route.
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Only POST allowed")
}
