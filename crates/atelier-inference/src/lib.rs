//! # atelier-inference
//!
//! Vision description backend abstraction for atelier.
//!
//! This crate provides:
//! - Pluggable description backend trait
//! - OpenAI-compatible vision backend
//! - Style persona prompt construction
//! - Upstream error translation (quota, auth, unknown)
//!
//! # Feature Flags
//!
//! - `mock`: Enable the mock backend outside of this crate's own tests
//!
//! # Example
//!
//! ```rust,no_run
//! use atelier_inference::{DescriptionBackend, OpenAIVisionBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAIVisionBackend::from_env().expect("OPENAI_API_KEY not set");
//!     let text = backend
//!         .describe_image(&[0u8; 4], "image/png", "Describe this artwork.")
//!         .await
//!         .unwrap();
//!     println!("{}", text);
//! }
//! ```

pub mod openai;
pub mod prompt;
pub mod vision;

// Mock description backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use atelier_core::*;

pub use openai::{OpenAIConfig, OpenAIVisionBackend};
pub use prompt::{describe_prompt, persona_instruction};
pub use vision::DescriptionBackend;

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCall, MockDescriptionBackend, MockFailure};
