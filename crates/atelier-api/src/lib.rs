//! atelier-api: HTTP service for AI artwork description generation.
//!
//! Exposes a single business endpoint, `POST /api/describe`, which accepts a
//! multipart form with an image and a brief description and returns a
//! generated description in the requested voice. Also serves `/health` and
//! Swagger UI at `/docs`.

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, Method};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use atelier_core::defaults;

pub mod error;
pub mod handlers;
pub mod spool;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically. Useful for
/// log correlation and debugging production incidents.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// OPENAPI DOCUMENTATION
// =============================================================================

/// OpenAPI documentation structure. Swagger UI at `/docs` fetches the
/// generated spec from `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::describe::describe_image, health_check),
    tags(
        (name = "Describe", description = "Artwork description generation"),
        (name = "System", description = "Health checks and system info")
    ),
    info(
        title = "Atelier Describe API",
        version = "2026.8.0",
        description = "AI artwork description service backed by an OpenAI-compatible vision model"
    )
)]
pub struct ApiDoc;

// =============================================================================
// HEALTH CHECK
// =============================================================================

/// Liveness probe reporting the service version and configured vision model.
#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is healthy")))]
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.model_name(),
    }))
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with all middleware attached.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Description generation
        .route(
            "/api/describe",
            post(handlers::describe::describe_image)
                .options(handlers::describe::describe_preflight)
                .fallback(handlers::describe::method_not_allowed),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            // Public endpoint: any origin may call, credentials are never accepted
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
                .max_age(std::time::Duration::from_secs(defaults::CORS_MAX_AGE_SECS)),
        )
        // Let the 4 MiB image plus multipart overhead through the extractor
        .layer(DefaultBodyLimit::max(defaults::MAX_BODY_SIZE_BYTES))
        .layer(RequestBodyLimitLayer::new(defaults::MAX_BODY_SIZE_BYTES))
        .with_state(state)
}
