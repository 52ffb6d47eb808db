//! Image generation request and reference types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request to an image-generation provider.
///
/// The provider always asks for a single square image returned as a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Prompt as it will be submitted (style suffix already applied, if any).
    pub prompt: String,
}

/// Where an [`ImageReference`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// Produced by the image provider.
    Generated,
    /// Deterministic stand-in produced after a provider failure.
    Placeholder,
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Generated => write!(f, "generated"),
            ImageSource::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// A displayable image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    pub url: String,
    pub source: ImageSource,
    /// The prompt that was (or would have been) submitted to the provider.
    pub submitted_prompt: String,
    /// Prompt rewritten by the provider, when it reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

impl ImageReference {
    pub fn is_placeholder(&self) -> bool {
        self.source == ImageSource::Placeholder
    }
}

/// A successful response from an image provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}
