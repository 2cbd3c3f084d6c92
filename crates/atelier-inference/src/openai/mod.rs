//! OpenAI-compatible vision backend.
//!
//! This module provides a description backend that works with any
//! OpenAI-compatible chat completions endpoint that accepts image
//! content parts, including:
//!
//! - OpenAI cloud API
//! - Azure OpenAI
//! - OpenRouter
//! - vLLM / LocalAI / LM Studio (vision-capable deployments)
//!
//! # Example
//!
//! ```rust,no_run
//! use atelier_inference::openai::{OpenAIConfig, OpenAIVisionBackend};
//! use atelier_inference::DescriptionBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     // From environment variables (None when OPENAI_API_KEY is unset)
//!     let backend = OpenAIVisionBackend::from_env().unwrap();
//!
//!     // Or with custom config
//!     let config = OpenAIConfig {
//!         base_url: "http://localhost:11434/v1".to_string(), // Ollama
//!         api_key: "ollama".to_string(),
//!         model: "llava".to_string(),
//!         ..OpenAIConfig::default()
//!     };
//!     let backend = OpenAIVisionBackend::new(config);
//!
//!     let description = backend
//!         .describe_image(&[0u8; 4], "image/png", "Describe this artwork.")
//!         .await
//!         .unwrap();
//!     println!("{}", description);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{OpenAIConfig, OpenAIVisionBackend};
pub use error::{to_atelier_error, OpenAIErrorCode};
pub use types::*;
