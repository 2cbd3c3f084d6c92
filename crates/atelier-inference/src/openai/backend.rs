//! OpenAI-compatible vision backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use atelier_core::{defaults, Error, Result};

use super::error::{to_atelier_error, OpenAIErrorCode};
use super::types::*;
use crate::vision::DescriptionBackend;

/// Configuration for the OpenAI-compatible vision backend.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Vision model used for description generation.
    pub model: String,
    /// Completion token budget per request.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key: String::new(),
            model: defaults::DEFAULT_OPENAI_VISION_MODEL.to_string(),
            max_tokens: defaults::MAX_COMPLETION_TOKENS,
            temperature: defaults::GENERATION_TEMPERATURE,
            timeout_seconds: defaults::DESCRIBE_TIMEOUT_SECS,
        }
    }
}

/// OpenAI-compatible vision backend (gpt-4o and compatible endpoints).
pub struct OpenAIVisionBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIVisionBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create from environment variables.
    /// Returns None if OPENAI_API_KEY is not set.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(defaults::ENV_OPENAI_API_KEY).ok()?;
        if api_key.is_empty() {
            return None;
        }
        let config = OpenAIConfig {
            base_url: std::env::var(defaults::ENV_OPENAI_BASE_URL)
                .unwrap_or_else(|_| defaults::DEFAULT_OPENAI_BASE_URL.to_string()),
            api_key,
            model: std::env::var(defaults::ENV_OPENAI_VISION_MODEL)
                .unwrap_or_else(|_| defaults::DEFAULT_OPENAI_VISION_MODEL.to_string()),
            timeout_seconds: std::env::var(defaults::ENV_OPENAI_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::DESCRIBE_TIMEOUT_SECS),
            ..OpenAIConfig::default()
        };
        Some(Self::new(config))
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

/// Encode image bytes as a base64 data URL.
fn data_url(image_data: &[u8], mime_type: &str) -> String {
    use base64::Engine;
    let image_b64 = base64::engine::general_purpose::STANDARD.encode(image_data);
    format!("data:{};base64,{}", mime_type, image_b64)
}

#[async_trait]
impl DescriptionBackend for OpenAIVisionBackend {
    async fn describe_image(
        &self,
        image_data: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String> {
        debug!(
            "Describing {} byte {} image with model {}, prompt length: {}",
            image_data.len(),
            mime_type,
            self.config.model,
            prompt.len()
        );

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: data_url(image_data, mime_type),
                            detail: Some(defaults::IMAGE_DETAIL.to_string()),
                        },
                    },
                ],
            }],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .send()
            .await
            .map_err(|e| Error::Request(format!("Describe request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body: OpenAIErrorResponse = response.json().await.unwrap_or(OpenAIErrorResponse {
                error: OpenAIError {
                    message: "Unknown error".to_string(),
                    error_type: "unknown".to_string(),
                    code: None,
                },
            });
            let code = OpenAIErrorCode::from_response(
                status,
                body.error.code.as_deref().unwrap_or(""),
                &body.error.message,
            );
            return Err(to_atelier_error(code, &body.error.message));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse completion response: {}", e)))?;

        let description = result
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| Error::Inference("Completion returned no choices".to_string()))?;

        debug!("Generated description, {} bytes", description.len());
        Ok(description)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.config.base_url.trim_end_matches('/'));
        match self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .timeout(Duration::from_secs(defaults::HEALTH_CHECK_TIMEOUT_SECS))
            .send()
            .await
        {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
