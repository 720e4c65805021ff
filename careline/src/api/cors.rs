//! # Origin allow-list CORS middleware
//!
//! Attaches the chat widget's CORS contract to every response, including
//! error responses. The `Access-Control-Allow-Origin` value echoes the
//! request `Origin` only when it appears in the configured allow-list;
//! otherwise it is the empty value, which denies cross-origin reads while
//! still letting the request complete server-side.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::api::state::AppState;

/// Resolve the `Access-Control-Allow-Origin` value for a request origin.
///
/// Returns the origin itself when allow-listed, the empty string otherwise.
pub fn resolve_origin<'a>(allowed: &[String], origin: Option<&'a str>) -> &'a str {
    match origin {
        Some(origin) if allowed.iter().any(|a| a == origin) => origin,
        _ => "",
    }
}

/// Axum middleware that stamps the CORS headers onto every response.
pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let allow_origin = resolve_origin(
        &state.config.chat.allowed_origins,
        origin.as_deref(),
    )
    .to_owned();

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_str(&allow_origin).unwrap_or(HeaderValue::from_static("")),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );

    response
}
