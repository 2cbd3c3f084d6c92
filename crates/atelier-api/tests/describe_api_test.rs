//! Integration tests for the describe API.
//!
//! Each test spawns the full router on an ephemeral port and drives it over
//! HTTP with a mock description backend injected, covering validation,
//! error mapping, CORS behavior, upload spool cleanup, and the health
//! endpoint.

use std::path::Path;
use std::sync::Arc;

use atelier_api::AppState;
use atelier_inference::{DescriptionBackend, MockDescriptionBackend, MockFailure};

/// PNG file signature followed by filler bytes.
const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

async fn spawn_app(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = atelier_api::app(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn state_with(backend: Option<MockDescriptionBackend>, spool_dir: &Path) -> AppState {
    AppState::new(
        backend.map(|b| Arc::new(b) as Arc<dyn DescriptionBackend>),
        spool_dir.to_path_buf(),
    )
}

fn png_part(bytes: Vec<u8>) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(bytes)
        .file_name("art.png")
        .mime_str("image/png")
        .unwrap()
}

fn base_form(short_desc: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("shortDesc", short_desc.to_string())
        .part("imageUpload", png_part(PNG_BYTES.to_vec()))
}

async fn post_describe(
    base_url: &str,
    form: reqwest::multipart::Form,
) -> (reqwest::StatusCode, serde_json::Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/api/describe", base_url))
        .multipart(form)
        .send()
        .await
        .unwrap();
    let status = response.status();
    let body: serde_json::Value = response.json().await.unwrap();
    (status, body)
}

fn spool_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

// =============================================================================
// SUCCESS PATH
// =============================================================================

#[tokio::test]
async fn test_describe_success_returns_description() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new().with_description("Hello world");
    let url = spawn_app(state_with(Some(backend), spool.path())).await;

    let (status, body) = post_describe(&url, base_form("a quiet harbor")).await;

    assert_eq!(status, 200);
    assert_eq!(body["description"], "Hello world");
    assert_eq!(body.as_object().unwrap().len(), 1, "single-key payload");
    assert_eq!(spool_entries(spool.path()), 0, "spool cleaned after success");
}

#[tokio::test]
async fn test_describe_passes_prompt_and_image_to_backend() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new();
    let url = spawn_app(state_with(Some(backend.clone()), spool.path())).await;

    let form = base_form("a quiet harbor at dusk")
        .text("wordCount", "250")
        .text("style", "poetic");
    let (status, _) = post_describe(&url, form).await;
    assert_eq!(status, 200);

    let calls = backend.get_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].prompt.starts_with("You are a poet"));
    assert!(calls[0].prompt.contains("\"a quiet harbor at dusk\""));
    assert!(calls[0].prompt.contains("approximately 250 words"));
    assert_eq!(calls[0].mime_type, "image/png");
    assert_eq!(calls[0].image_bytes, PNG_BYTES.len());
}

#[tokio::test]
async fn test_describe_idempotent_for_identical_requests() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new().with_description("Same every time");
    let url = spawn_app(state_with(Some(backend.clone()), spool.path())).await;

    let (status_a, body_a) = post_describe(&url, base_form("a red door")).await;
    let (status_b, body_b) = post_describe(&url, base_form("a red door")).await;

    assert_eq!(status_a, 200);
    assert_eq!(status_b, 200);
    assert_eq!(body_a, body_b);

    let calls = backend.get_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].prompt, calls[1].prompt);
}

// =============================================================================
// VALIDATION
// =============================================================================

#[tokio::test]
async fn test_describe_missing_short_desc() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new();
    let url = spawn_app(state_with(Some(backend.clone()), spool.path())).await;

    let form = reqwest::multipart::Form::new().part("imageUpload", png_part(PNG_BYTES.to_vec()));
    let (status, body) = post_describe(&url, form).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Brief description is required");
    assert_eq!(backend.describe_call_count(), 0);
}

#[tokio::test]
async fn test_describe_blank_short_desc() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(Some(MockDescriptionBackend::new()), spool.path())).await;

    let (status, body) = post_describe(&url, base_form("   ")).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Brief description is required");
}

#[tokio::test]
async fn test_describe_missing_image() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(Some(MockDescriptionBackend::new()), spool.path())).await;

    let form = reqwest::multipart::Form::new().text("shortDesc", "a quiet harbor");
    let (status, body) = post_describe(&url, form).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Image is required");
}

#[tokio::test]
async fn test_describe_image_too_large() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new();
    let url = spawn_app(state_with(Some(backend.clone()), spool.path())).await;

    let oversized = vec![0u8; 4 * 1024 * 1024 + 1];
    let form = reqwest::multipart::Form::new()
        .text("shortDesc", "a quiet harbor")
        .part("imageUpload", png_part(oversized));
    let (status, body) = post_describe(&url, form).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Image too large (max 4MB)");
    assert_eq!(backend.describe_call_count(), 0);
    assert_eq!(
        spool_entries(spool.path()),
        0,
        "spool cleaned after size rejection"
    );
}

#[tokio::test]
async fn test_describe_unknown_style_falls_back_to_professional() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new();
    let url = spawn_app(state_with(Some(backend.clone()), spool.path())).await;

    let form = base_form("a quiet harbor").text("style", "baroque");
    let (status, _) = post_describe(&url, form).await;

    assert_eq!(status, 200);
    let calls = backend.get_calls();
    assert!(calls[0].prompt.starts_with("You are an art curator"));
}

#[tokio::test]
async fn test_describe_invalid_word_count_falls_back_to_default() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new();
    let url = spawn_app(state_with(Some(backend.clone()), spool.path())).await;

    let form = base_form("a quiet harbor").text("wordCount", "many");
    let (status, _) = post_describe(&url, form).await;

    assert_eq!(status, 200);
    let calls = backend.get_calls();
    assert!(calls[0].prompt.contains("approximately 100 words"));
}

#[tokio::test]
async fn test_describe_word_count_capped() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new();
    let url = spawn_app(state_with(Some(backend.clone()), spool.path())).await;

    let form = base_form("a quiet harbor").text("wordCount", "9999");
    let (status, _) = post_describe(&url, form).await;

    assert_eq!(status, 200);
    let calls = backend.get_calls();
    assert!(calls[0].prompt.contains("approximately 500 words"));
}

#[tokio::test]
async fn test_describe_sniffs_mime_when_undeclared() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new();
    let url = spawn_app(state_with(Some(backend.clone()), spool.path())).await;

    // No content type on the part; the PNG signature should be sniffed.
    let form = reqwest::multipart::Form::new()
        .text("shortDesc", "a quiet harbor")
        .part(
            "imageUpload",
            reqwest::multipart::Part::bytes(PNG_BYTES.to_vec()).file_name("art"),
        );
    let (status, _) = post_describe(&url, form).await;

    assert_eq!(status, 200);
    assert_eq!(backend.get_calls()[0].mime_type, "image/png");
}

#[tokio::test]
async fn test_describe_falls_back_to_jpeg_for_unknown_bytes() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new();
    let url = spawn_app(state_with(Some(backend.clone()), spool.path())).await;

    let form = reqwest::multipart::Form::new()
        .text("shortDesc", "a quiet harbor")
        .part(
            "imageUpload",
            reqwest::multipart::Part::bytes(b"not an image".to_vec()).file_name("art"),
        );
    let (status, _) = post_describe(&url, form).await;

    assert_eq!(status, 200);
    assert_eq!(backend.get_calls()[0].mime_type, "image/jpeg");
}

// =============================================================================
// CONFIGURATION AND UPSTREAM ERRORS
// =============================================================================

#[tokio::test]
async fn test_describe_without_backend_returns_not_configured() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(None, spool.path())).await;

    let (status, body) = post_describe(&url, base_form("a quiet harbor")).await;

    assert_eq!(status, 500);
    assert_eq!(
        body["error"],
        "Description backend not configured. Set the OPENAI_API_KEY environment variable."
    );
    assert_eq!(spool_entries(spool.path()), 0);
}

#[tokio::test]
async fn test_validation_precedes_configuration_check() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(None, spool.path())).await;

    let form = reqwest::multipart::Form::new().part("imageUpload", png_part(PNG_BYTES.to_vec()));
    let (status, body) = post_describe(&url, form).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Brief description is required");
}

#[tokio::test]
async fn test_describe_quota_error() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new().with_failure(MockFailure::Quota);
    let url = spawn_app(state_with(Some(backend), spool.path())).await;

    let (status, body) = post_describe(&url, base_form("a quiet harbor")).await;

    assert_eq!(status, 500);
    assert_eq!(
        body["error"],
        "API quota exceeded. Please add credits at https://platform.openai.com/account/billing"
    );
    assert_eq!(spool_entries(spool.path()), 0, "spool cleaned after failure");
}

#[tokio::test]
async fn test_describe_auth_error() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new().with_failure(MockFailure::Auth);
    let url = spawn_app(state_with(Some(backend), spool.path())).await;

    let (status, body) = post_describe(&url, base_form("a quiet harbor")).await;

    assert_eq!(status, 500);
    assert_eq!(
        body["error"],
        "Invalid API key. Please check your OPENAI_API_KEY configuration."
    );
}

#[tokio::test]
async fn test_describe_upstream_error_is_generic() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new().with_failure(MockFailure::Upstream);
    let url = spawn_app(state_with(Some(backend), spool.path())).await;

    let (status, body) = post_describe(&url, base_form("a quiet harbor")).await;

    assert_eq!(status, 500);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to generate description:"));
}

// =============================================================================
// METHODS AND CORS
// =============================================================================

#[tokio::test]
async fn test_describe_rejects_get() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(Some(MockDescriptionBackend::new()), spool.path())).await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/describe", url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 405);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn test_describe_options_returns_ok_with_empty_body() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(Some(MockDescriptionBackend::new()), spool.path())).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/api/describe", url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(Some(MockDescriptionBackend::new()), spool.path())).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/api/describe", url))
        .header("Origin", "https://gallery.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");

    let methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));

    let allow_headers = headers
        .get("access-control-allow-headers")
        .unwrap()
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allow_headers.contains("content-type"));
}

#[tokio::test]
async fn test_cors_headers_on_actual_response() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(Some(MockDescriptionBackend::new()), spool.path())).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/describe", url))
        .header("Origin", "https://gallery.example")
        .multipart(base_form("a quiet harbor"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

// =============================================================================
// SYSTEM ENDPOINTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let spool = tempfile::tempdir().unwrap();
    let backend = MockDescriptionBackend::new().with_model("mock-vision");
    let url = spawn_app(state_with(Some(backend), spool.path())).await;

    let response = reqwest::Client::new()
        .get(format!("{}/health", url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["model"], "mock-vision");
}

#[tokio::test]
async fn test_health_reports_missing_model() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(None, spool.path())).await;

    let response = reqwest::Client::new()
        .get(format!("{}/health", url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["model"].is_null());
}

#[tokio::test]
async fn test_openapi_spec_served() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(None, spool.path())).await;

    let response = reqwest::Client::new()
        .get(format!("{}/api-docs/openapi.json", url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["paths"].get("/api/describe").is_some());
}

#[tokio::test]
async fn test_request_id_header_present() {
    let spool = tempfile::tempdir().unwrap();
    let url = spawn_app(state_with(None, spool.path())).await;

    let response = reqwest::Client::new()
        .get(format!("{}/health", url))
        .send()
        .await
        .unwrap();

    let request_id = response.headers().get("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
}
