//! Image-generation provider implementations.

pub mod openai;
mod types;

use std::time::Duration;

use supergpt_core::image::provider::BoxImageProvider;
use supergpt_types::config::ImageProviderConfig;
use supergpt_types::llm::LlmError;

use self::openai::OpenAiImageProvider;
use crate::secret::ResolvedKey;

/// Build the image provider, or `None` when no usable key is configured.
///
/// With no provider the orchestrator serves deterministic placeholders.
pub fn create_image_provider(
    config: &ImageProviderConfig,
    key: Option<ResolvedKey>,
) -> Result<Option<BoxImageProvider>, LlmError> {
    let Some(key) = key else {
        tracing::info!("No image API key found; image requests will return placeholders");
        return Ok(None);
    };

    let provider = OpenAiImageProvider::new(
        key.secret,
        &config.base_url,
        &config.model,
        &config.size,
        Duration::from_secs(config.timeout_secs.max(1)),
    )?;
    tracing::debug!(model = %provider.model(), env_var = %key.env_var, "Image provider configured");
    Ok(Some(BoxImageProvider::new(provider)))
}
