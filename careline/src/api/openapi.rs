use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CareLine Chat Proxy",
        version = "0.1.0",
        description = "Stateless chat proxy backing the Phyllis Home Care website widget.",
    ),
    paths(
        handlers::health::health_check,
        handlers::chat::chat,
    ),
    components(schemas(
        dto::ChatRequest,
        dto::ChatReply,
        dto::ChatError,
        handlers::health::HealthData,
        handlers::health::UpstreamStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "chat", description = "Chat proxy endpoint"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
