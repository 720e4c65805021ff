use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use careline::api::{create_router, AppState};
use careline::config::{ChatConfig, Config, ServerConfig};

pub const TEST_ORIGIN: &str = "https://phyllishomecare.com";

/// Fabricated configuration pointing at a mock upstream.
pub fn test_config(base_url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        chat: ChatConfig {
            allowed_origins: vec![TEST_ORIGIN.to_string()],
            system_prompt: None,
            model: "gpt-4o-mini".to_string(),
            api_key: Some("test-key".to_string()),
            base_url,
            max_tokens: 320,
            timeout_secs: 5,
        },
    }
}

pub fn build_app(base_url: String) -> Router {
    let state = AppState::new(test_config(base_url)).expect("state should build");
    create_router(state)
}

/// Send one request through the router and collect status, headers, and
/// raw body bytes.
pub async fn send(
    app: Router,
    method: &str,
    origin: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder()
        .method(method)
        .uri("/v1/chat")
        .header("content-type", "application/json");
    if let Some(origin) = origin {
        builder = builder.header("origin", origin);
    }

    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .expect("request should build");

    let response = app.oneshot(request).await.expect("router should respond");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    (status, headers, bytes.to_vec())
}

pub fn json_body(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).expect("body should be JSON")
}

/// Standard upstream completion body with the given assistant content.
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}
