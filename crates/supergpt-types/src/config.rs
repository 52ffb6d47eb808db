//! Global configuration types for SuperGPT.
//!
//! `AppConfig` represents the top-level `config.toml` that selects the text
//! and image providers and shapes the prompt. All fields have defaults, so an
//! empty file (or no file) is a valid configuration. API keys never live here;
//! they come from the environment.

use serde::{Deserialize, Serialize};

/// Hard upper bound on the number of prior turns sent as context.
pub const MAX_HISTORY_WINDOW: usize = 10;

/// Top-level configuration.
///
/// Loaded from `~/.supergpt/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Number of prior turns sent as context (clamped to [`MAX_HISTORY_WINDOW`]).
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    #[serde(default)]
    pub text: TextProviderConfig,

    #[serde(default)]
    pub image: ImageProviderConfig,
}

fn default_history_window() -> usize {
    MAX_HISTORY_WINDOW
}

impl AppConfig {
    /// History window after clamping to the hard upper bound.
    pub fn effective_history_window(&self) -> usize {
        self.history_window.min(MAX_HISTORY_WINDOW)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            text: TextProviderConfig::default(),
            image: ImageProviderConfig::default(),
        }
    }
}

/// Text-generation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextProviderConfig {
    /// Well-known provider name ("gemini", "openai") or a custom label.
    #[serde(default = "default_text_provider")]
    pub provider: String,

    #[serde(default = "default_text_model")]
    pub model: String,

    /// Override the provider's default OpenAI-compatible base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub temperature: Option<f64>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_text_provider() -> String {
    "gemini".to_string()
}

fn default_text_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for TextProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_text_provider(),
            model: default_text_model(),
            base_url: None,
            max_tokens: default_max_tokens(),
            temperature: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Image-generation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageProviderConfig {
    #[serde(default = "default_image_model")]
    pub model: String,

    #[serde(default = "default_image_base_url")]
    pub base_url: String,

    /// Square resolution, e.g. "1024x1024".
    #[serde(default = "default_image_size")]
    pub size: String,

    #[serde(default = "default_image_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_image_timeout_secs() -> u64 {
    120
}

impl Default for ImageProviderConfig {
    fn default() -> Self {
        Self {
            model: default_image_model(),
            base_url: default_image_base_url(),
            size: default_image_size(),
            timeout_secs: default_image_timeout_secs(),
        }
    }
}
