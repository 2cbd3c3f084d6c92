//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use atelier_core::defaults;
use atelier_inference::{DescriptionBackend, OpenAIVisionBackend};

/// State handed to every handler. The description backend is resolved once at
/// startup; `None` means the service is running without a credential and
/// description requests will fail with a configuration error.
#[derive(Clone)]
pub struct AppState {
    pub description_backend: Option<Arc<dyn DescriptionBackend>>,
    pub spool_dir: PathBuf,
}

impl AppState {
    pub fn new(description_backend: Option<Arc<dyn DescriptionBackend>>, spool_dir: PathBuf) -> Self {
        Self {
            description_backend,
            spool_dir,
        }
    }

    /// Build state from the environment. The backend is `None` when
    /// `OPENAI_API_KEY` is unset or empty.
    pub fn from_env() -> Self {
        let description_backend = OpenAIVisionBackend::from_env()
            .map(|b| Arc::new(b) as Arc<dyn DescriptionBackend>);

        let spool_dir = std::env::var(defaults::ENV_SPOOL_DIR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);

        Self::new(description_backend, spool_dir)
    }

    /// Model name for health reporting, if a backend is configured.
    pub fn model_name(&self) -> Option<&str> {
        self.description_backend.as_deref().map(|b| b.model_name())
    }
}
