//! Artwork description HTTP handlers.
//!
//! Accepts an uploaded image plus a brief description and returns a polished
//! description generated by the configured vision backend. The upload is
//! spooled to disk for the duration of the request and removed on every exit
//! path.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::{debug, error, info};

use atelier_core::defaults;
use atelier_core::models::{DescriptionRequest, Style};
use atelier_inference::describe_prompt;

use crate::error::MSG_NOT_CONFIGURED;
use crate::spool::UploadSpool;
use crate::{ApiError, AppState};

/// Response from description generation.
#[derive(Debug, Serialize)]
pub struct DescribeResponse {
    /// Generated artwork description.
    pub description: String,
}

/// Generate an artwork description from an uploaded image.
///
/// Accepts multipart/form-data with an image file and a brief description and
/// returns a polished, detailed description in the requested voice. Requires
/// `OPENAI_API_KEY` to be configured.
///
/// # Multipart Fields
/// - `shortDesc`: Brief description of the artwork (required)
/// - `imageUpload`: Image file, at most 4 MiB (required)
/// - `wordCount`: Target length in words, 1..=500 (optional, default 100)
/// - `style`: Description voice, one of professional, technical, poetic,
///   philosophical, scientific, abstract (optional, default professional)
///
/// # Returns
/// - 200 OK with the generated description
/// - 400 Bad Request if a required field is missing or the image exceeds 4 MiB
/// - 500 Internal Server Error if no API key is configured or the upstream call fails
#[utoipa::path(post, path = "/api/describe", tag = "Describe",
    responses((status = 200, description = "Generated description")))]
pub async fn describe_image(
    State(state): State<AppState>,
    mut multipart: axum::extract::Multipart,
) -> Result<Json<DescribeResponse>, ApiError> {
    let started = Instant::now();

    let mut short_desc: Option<String> = None;
    let mut word_count: Option<String> = None;
    let mut style: Option<String> = None;
    let mut image: Option<UploadSpool> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Upload parsing failed: {}", e)))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("shortDesc") => {
                short_desc = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Upload parsing failed: {}", e)))?,
                );
            }
            Some("imageUpload") => {
                let declared = field.content_type().map(|c| c.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Upload parsing failed: {}", e)))?;
                let mime_type = resolve_mime(declared.as_deref(), &data);
                image = Some(UploadSpool::write(&state.spool_dir, &mime_type, &data)?);
            }
            Some("wordCount") => {
                word_count = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Upload parsing failed: {}", e)))?,
                );
            }
            Some("style") => {
                style = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Upload parsing failed: {}", e)))?,
                );
            }
            _ => {} // ignore unknown fields
        }
    }

    let request = validate_request(
        short_desc.as_deref(),
        image.as_ref(),
        word_count.as_deref(),
        style.as_deref(),
    )?;

    // Validation errors win over a missing credential.
    let backend = state
        .description_backend
        .as_ref()
        .ok_or_else(|| ApiError::Config(MSG_NOT_CONFIGURED.to_string()))?;

    let spool = image.ok_or_else(|| ApiError::BadRequest("Image is required".to_string()))?;

    debug!(
        image_bytes = request.image_size,
        mime_type = %request.mime_type,
        style = %request.style,
        word_count = request.word_count,
        model = backend.model_name(),
        "Generating description"
    );

    let prompt = describe_prompt(&request);
    let image_data = spool.read()?;

    let description = backend
        .describe_image(&image_data, &request.mime_type, &prompt)
        .await
        .map_err(|e| {
            error!(error = %e, "Description generation failed");
            ApiError::from(e)
        })?;

    info!(
        duration_ms = started.elapsed().as_millis() as u64,
        response_len = description.len(),
        style = %request.style,
        "Description generated"
    );

    Ok(Json(DescribeResponse { description }))
}

/// CORS preflight for the describe endpoint. Returns 200 with no body; the
/// CORS layer attaches the allow headers.
pub async fn describe_preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for unsupported methods on the describe endpoint.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method not allowed" })),
    )
}

/// Check the parsed form fields and build a validated request.
///
/// Enforced order: brief description first, then image presence, then image
/// size. Optional fields never fail validation; unparseable word counts and
/// unknown styles fall back to their defaults.
pub(crate) fn validate_request(
    short_desc: Option<&str>,
    image: Option<&UploadSpool>,
    word_count: Option<&str>,
    style: Option<&str>,
) -> Result<DescriptionRequest, ApiError> {
    let short_description = match short_desc {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => {
            return Err(ApiError::BadRequest(
                "Brief description is required".to_string(),
            ))
        }
    };

    let spool = image.ok_or_else(|| ApiError::BadRequest("Image is required".to_string()))?;

    if spool.len() > defaults::MAX_IMAGE_SIZE_BYTES {
        return Err(ApiError::BadRequest("Image too large (max 4MB)".to_string()));
    }

    Ok(DescriptionRequest {
        short_description,
        mime_type: spool.mime_type().to_string(),
        image_size: spool.len(),
        word_count: parse_word_count(word_count),
        style: style.and_then(Style::from_str_loose).unwrap_or_default(),
    })
}

/// Clamp a client-supplied word count to `1..=MAX_WORD_COUNT`, falling back to
/// the default when absent, unparseable, or zero.
fn parse_word_count(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&n| n >= 1)
        .map(|n| n.min(defaults::MAX_WORD_COUNT))
        .unwrap_or(defaults::DEFAULT_WORD_COUNT)
}

/// Resolve the upload's MIME type: declared content type first, then magic
/// bytes, then the JPEG fallback.
fn resolve_mime(declared: Option<&str>, data: &[u8]) -> String {
    if let Some(ct) = declared {
        let ct = ct.trim();
        if !ct.is_empty() {
            return ct.to_string();
        }
    }
    infer::get(data)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| defaults::FALLBACK_IMAGE_MIME.to_string())
}
