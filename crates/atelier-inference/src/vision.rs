//! Description backend trait for image-to-text generation.

use async_trait::async_trait;
use atelier_core::Result;

/// Backend for generating artwork descriptions from images using vision LLMs.
///
/// Implementations receive the raw image bytes, the resolved MIME type, and
/// a fully built prompt. Errors carry the upstream failure taxonomy
/// ([`atelier_core::Error::QuotaExceeded`], [`atelier_core::Error::Auth`],
/// or the generic inference/request variants); none are retried here.
#[async_trait]
pub trait DescriptionBackend: Send + Sync {
    /// Generate a description for an image.
    async fn describe_image(
        &self,
        image_data: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String>;

    /// Check if the description backend is available.
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
