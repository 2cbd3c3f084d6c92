//! Mock description backend for deterministic testing.
//!
//! Provides a [`DescriptionBackend`] implementation with configurable
//! responses, deterministic failure injection, and a call log for
//! assertions. Identical inputs always produce identical outputs, so
//! idempotence tests can compare repeated calls directly.
//!
//! ## Usage
//!
//! ```rust
//! use atelier_inference::mock::MockDescriptionBackend;
//! use atelier_inference::DescriptionBackend;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let backend = MockDescriptionBackend::new().with_description("Hello world");
//!
//! let text = backend
//!     .describe_image(&[0u8; 4], "image/png", "prompt")
//!     .await
//!     .unwrap();
//! assert_eq!(text, "Hello world");
//! assert_eq!(backend.describe_call_count(), 1);
//! # }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use atelier_core::{Error, Result};

use crate::vision::DescriptionBackend;

/// Mock description backend for testing.
#[derive(Clone)]
pub struct MockDescriptionBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    description: String,
    model: String,
    failure: Option<MockFailure>,
    latency_ms: u64,
    healthy: bool,
}

/// Deterministic failure modes mirroring the upstream error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Account out of credit ([`Error::QuotaExceeded`]).
    Quota,
    /// Credential rejected ([`Error::Auth`]).
    Auth,
    /// Any other upstream failure ([`Error::Inference`]).
    Upstream,
}

/// One recorded describe call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub prompt: String,
    pub mime_type: String,
    pub image_bytes: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            description: "Mock description".to_string(),
            model: "mock-vision".to_string(),
            failure: None,
            latency_ms: 0,
            healthy: true,
        }
    }
}

impl MockDescriptionBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the description returned by every successful call.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).description = description.into();
        self
    }

    /// Set the reported model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).model = model.into();
        self
    }

    /// Make every describe call fail with the given mode.
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(failure);
        self
    }

    /// Set simulated latency for describe calls.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Set the health check result.
    pub fn with_healthy(mut self, healthy: bool) -> Self {
        Arc::make_mut(&mut self.config).healthy = healthy;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    /// Get number of describe calls.
    pub fn describe_call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    fn log_call(&self, prompt: &str, mime_type: &str, image_bytes: usize) {
        self.call_log.lock().unwrap().push(MockCall {
            prompt: prompt.to_string(),
            mime_type: mime_type.to_string(),
            image_bytes,
        });
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

impl Default for MockDescriptionBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DescriptionBackend for MockDescriptionBackend {
    async fn describe_image(
        &self,
        image_data: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String> {
        self.log_call(prompt, mime_type, image_data.len());
        self.simulate_latency().await;

        match self.config.failure {
            Some(MockFailure::Quota) => Err(Error::QuotaExceeded(
                "You exceeded your current quota, please check your plan and billing details."
                    .to_string(),
            )),
            Some(MockFailure::Auth) => {
                Err(Error::Auth("Incorrect API key provided.".to_string()))
            }
            Some(MockFailure::Upstream) => {
                Err(Error::Inference("Simulated upstream failure".to_string()))
            }
            None => Ok(self.config.description.clone()),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.config.healthy)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
