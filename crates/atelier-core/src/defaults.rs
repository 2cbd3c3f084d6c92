//! Centralized default constants for the atelier system.
//!
//! **This module is the single source of truth** for all shared default values.
//! All crates should reference these constants instead of defining their own
//! magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Maximum request body size in bytes (16 MB).
/// Sized well above [`MAX_IMAGE_SIZE_BYTES`] plus multipart framing so that
/// oversized images reach the validator and receive its 400 response; the
/// transport cap only guards against grossly abusive bodies.
pub const MAX_BODY_SIZE_BYTES: usize = 16 * 1024 * 1024;

// =============================================================================
// UPLOAD VALIDATION
// =============================================================================

/// Maximum accepted image upload size in bytes (4 MB).
/// This limit is enforced by the request validator after the upload has been
/// spooled, so the client receives the validation message rather than a bare
/// transport rejection.
pub const MAX_IMAGE_SIZE_BYTES: usize = 4 * 1024 * 1024;

/// Fallback MIME type when an upload declares none and magic-byte detection
/// finds no match.
pub const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

// =============================================================================
// DESCRIPTION GENERATION
// =============================================================================

/// Default target word count for generated descriptions.
pub const DEFAULT_WORD_COUNT: u32 = 100;

/// Maximum target word count accepted from clients. Larger requests are
/// capped here rather than rejected.
pub const MAX_WORD_COUNT: u32 = 500;

/// Maximum completion tokens requested from the description service.
pub const MAX_COMPLETION_TOKENS: u32 = 500;

/// Sampling temperature for description generation.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// Detail level requested for image analysis.
pub const IMAGE_DETAIL: &str = "high";

// =============================================================================
// DESCRIPTION SERVICE CONFIGURATION
// =============================================================================

/// Environment variable for the description service API key.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable for the description service base URL.
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable for the vision model name.
pub const ENV_OPENAI_VISION_MODEL: &str = "OPENAI_VISION_MODEL";

/// Default vision model for image description.
pub const DEFAULT_OPENAI_VISION_MODEL: &str = "gpt-4o";

/// Environment variable for the description request timeout in seconds.
pub const ENV_OPENAI_TIMEOUT: &str = "OPENAI_TIMEOUT";

/// Timeout for description requests in seconds.
pub const DESCRIBE_TIMEOUT_SECS: u64 = 60;

/// Timeout for backend health checks in seconds.
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// UPLOAD SPOOL
// =============================================================================

/// Environment variable overriding the upload spool directory.
/// Defaults to the system temp directory when unset.
pub const ENV_SPOOL_DIR: &str = "ATELIER_SPOOL_DIR";
