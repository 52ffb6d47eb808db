//! Text-generation provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `supergpt-core`, and a factory ([`create_text_backend`])
//! that turns configuration plus a resolved credential into the
//! orchestrator's [`TextBackend`].
//!
//! [`LlmProvider`]: supergpt_core::llm::provider::LlmProvider

pub mod openai_compat;

use std::time::Duration;

use secrecy::SecretString;

use supergpt_core::llm::box_provider::BoxLlmProvider;
use supergpt_core::orchestrator::TextBackend;
use supergpt_types::config::TextProviderConfig;
use supergpt_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{
    OpenAiCompatConfig, custom_defaults, gemini_defaults, mistral_defaults, openai_defaults,
};
use crate::secret::{ResolvedKey, TEXT_KEY_VAR};

/// Provider configuration for a well-known name. Unknown names hand the key back.
fn known_provider(
    name: &str,
    api_key: SecretString,
    model: &str,
) -> Result<OpenAiCompatConfig, SecretString> {
    match name {
        "gemini" => Ok(gemini_defaults(api_key, model)),
        "openai" => Ok(openai_defaults(api_key, model)),
        "mistral" => Ok(mistral_defaults(api_key, model)),
        _ => Err(api_key),
    }
}

/// Create a [`BoxLlmProvider`] from configuration and an API key.
///
/// A `base_url` in the config overrides the provider's default endpoint. An
/// unknown provider name without a `base_url` is an invalid request.
pub fn create_text_provider(
    config: &TextProviderConfig,
    api_key: SecretString,
) -> Result<BoxLlmProvider, LlmError> {
    let mut provider_config = match known_provider(&config.provider, api_key, &config.model) {
        Ok(mut known) => {
            if let Some(base_url) = config.base_url.as_deref() {
                known.base_url = base_url.trim_end_matches('/').to_string();
            }
            known
        }
        Err(api_key) => match config.base_url.as_deref() {
            Some(base_url) => custom_defaults(&config.provider, base_url, api_key, &config.model),
            None => {
                return Err(LlmError::InvalidRequest(format!(
                    "unknown text provider '{}' (set text.base_url for custom endpoints)",
                    config.provider
                )));
            }
        },
    };
    provider_config.timeout = Duration::from_secs(config.timeout_secs.max(1));

    let provider = OpenAiCompatibleProvider::new(provider_config)?;
    Ok(BoxLlmProvider::new(provider))
}

/// Build the orchestrator's text backend.
///
/// Without a usable key the backend is [`TextBackend::Unconfigured`], so the
/// orchestrator answers with configuration instructions and never touches
/// the network.
pub fn create_text_backend(
    config: &TextProviderConfig,
    key: Option<ResolvedKey>,
) -> Result<TextBackend, LlmError> {
    match key {
        Some(key) => {
            tracing::debug!(
                provider = %config.provider,
                model = %config.model,
                env_var = %key.env_var,
                "Text provider configured"
            );
            Ok(TextBackend::Ready(create_text_provider(config, key.secret)?))
        }
        None => {
            tracing::warn!(
                provider = %config.provider,
                env_var = TEXT_KEY_VAR,
                "No API key found for text provider; replies will explain how to configure one"
            );
            Ok(TextBackend::Unconfigured {
                provider: config.provider.clone(),
                env_var: TEXT_KEY_VAR.to_string(),
            })
        }
    }
}
