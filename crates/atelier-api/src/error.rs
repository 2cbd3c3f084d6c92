//! API error handling and HTTP response mapping.
//!
//! Every failure resolves at the request boundary into a status code plus a
//! static, human-readable `{"error": "<message>"}` body. No retries, no
//! structured error codes on the wire.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Client-facing message when no description backend is configured.
pub const MSG_NOT_CONFIGURED: &str =
    "Description backend not configured. Set the OPENAI_API_KEY environment variable.";

/// Client-facing message when the upstream account is out of credit.
pub const MSG_QUOTA_EXCEEDED: &str =
    "API quota exceeded. Please add credits at https://platform.openai.com/account/billing";

/// Client-facing message when the upstream rejects the credential.
pub const MSG_INVALID_KEY: &str =
    "Invalid API key. Please check your OPENAI_API_KEY configuration.";

/// API-level error. Each variant carries the exact message sent to clients.
#[derive(Debug)]
pub enum ApiError {
    /// Client-caused failure (validation, malformed upload). 400.
    BadRequest(String),
    /// Service misconfiguration discovered at request time. 500.
    Config(String),
    /// Upstream account has no remaining credit. 500.
    UpstreamQuota(String),
    /// Upstream rejected the API credential. 500.
    UpstreamAuth(String),
    /// Any other upstream or internal failure. 500.
    Upstream(String),
}

impl From<atelier_core::Error> for ApiError {
    fn from(err: atelier_core::Error) -> Self {
        match &err {
            atelier_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            atelier_core::Error::Config(_) => ApiError::Config(MSG_NOT_CONFIGURED.to_string()),
            atelier_core::Error::QuotaExceeded(_) => {
                ApiError::UpstreamQuota(MSG_QUOTA_EXCEEDED.to_string())
            }
            atelier_core::Error::Auth(_) => ApiError::UpstreamAuth(MSG_INVALID_KEY.to_string()),
            _ => ApiError::Upstream(format!("Failed to generate description: {}", err)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UpstreamQuota(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UpstreamAuth(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
