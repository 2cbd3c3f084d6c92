//! Domain models for atelier.

use serde::{Deserialize, Serialize};

use crate::defaults;

// =============================================================================
// DESCRIPTION STYLE
// =============================================================================

/// Voice used for a generated artwork description.
///
/// Unrecognized client values fall back to [`Style::Professional`] at parse
/// time; the fallback is policy, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Professional,
    Technical,
    Poetic,
    Philosophical,
    Scientific,
    Abstract,
}

impl Style {
    /// All styles, in presentation order.
    pub const ALL: [Style; 6] = [
        Style::Professional,
        Style::Technical,
        Style::Poetic,
        Style::Philosophical,
        Style::Scientific,
        Style::Abstract,
    ];

    /// Parse a style from a client-supplied string (case-insensitive, trimmed).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Some(Self::Professional),
            "technical" => Some(Self::Technical),
            "poetic" => Some(Self::Poetic),
            "philosophical" => Some(Self::Philosophical),
            "scientific" => Some(Self::Scientific),
            "abstract" => Some(Self::Abstract),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Technical => "technical",
            Self::Poetic => "poetic",
            Self::Philosophical => "philosophical",
            Self::Scientific => "scientific",
            Self::Abstract => "abstract",
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::Professional
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// DESCRIPTION REQUEST
// =============================================================================

/// Validated parameters for one description request.
///
/// The image bytes themselves stay in the request handler's upload spool;
/// this carries the metadata the prompt builder and backend call need.
/// Construction happens in the request validator, which guarantees a
/// non-blank description and an image no larger than
/// [`defaults::MAX_IMAGE_SIZE_BYTES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionRequest {
    /// Client-supplied brief description, as received.
    pub short_description: String,
    /// Resolved MIME type of the uploaded image.
    pub mime_type: String,
    /// Spooled image size in bytes.
    pub image_size: usize,
    /// Target word count for the generated description.
    pub word_count: u32,
    /// Selected description voice.
    pub style: Style,
}

impl DescriptionRequest {
    /// Construct a request with default word count and style.
    pub fn new(
        short_description: impl Into<String>,
        mime_type: impl Into<String>,
        image_size: usize,
    ) -> Self {
        Self {
            short_description: short_description.into(),
            mime_type: mime_type.into(),
            image_size,
            word_count: defaults::DEFAULT_WORD_COUNT,
            style: Style::default(),
        }
    }
}
