//! OpenAI-specific error handling.

use atelier_core::Error;

/// OpenAI-specific error codes.
///
/// Only the failure classes the service distinguishes for clients are
/// separated; everything else collapses to [`OpenAIErrorCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAIErrorCode {
    /// Account has no remaining credit.
    InsufficientQuota,
    /// Invalid authentication credentials.
    AuthenticationError,
    /// Unknown error.
    Unknown,
}

impl OpenAIErrorCode {
    /// Determine error code from HTTP status, error code, and message.
    ///
    /// Quota exhaustion arrives as HTTP 429 with code `insufficient_quota`,
    /// so the code string is checked before the status. Credential
    /// rejections surface either as HTTP 401 or as an "Incorrect API key"
    /// message on older-style responses.
    pub fn from_response(status: u16, code: &str, message: &str) -> Self {
        if code == "insufficient_quota" {
            return Self::InsufficientQuota;
        }
        if status == 401 || message.contains("Incorrect API key") {
            return Self::AuthenticationError;
        }
        Self::Unknown
    }
}

/// Convert an OpenAI error code to an atelier Error.
pub fn to_atelier_error(code: OpenAIErrorCode, message: &str) -> Error {
    match code {
        OpenAIErrorCode::InsufficientQuota => Error::QuotaExceeded(message.to_string()),
        OpenAIErrorCode::AuthenticationError => Error::Auth(message.to_string()),
        OpenAIErrorCode::Unknown => Error::Inference(message.to_string()),
    }
}
