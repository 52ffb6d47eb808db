//! Response orchestrator: turns a user message plus session history into an
//! assistant reply, and a prompt into a displayable image.
//!
//! Failure handling is total. `respond` always resolves to text and
//! `generate_image` always resolves to an image reference; provider errors
//! are logged with their kind and replaced by a fixed fallback. No retries.

use std::time::Instant;

use tracing::{Instrument, info, info_span, warn};

use supergpt_types::chat::Turn;
use supergpt_types::image::{ImageReference, ImageRequest, ImageSource};
use supergpt_types::llm::LlmError;
use supergpt_types::persona::Persona;

use crate::image::placeholder::placeholder_reference;
use crate::image::provider::BoxImageProvider;
use crate::image::style::apply_style_suffix;
use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::prompt::{PromptSettings, build_request};

/// Reply used for every provider failure on the chat path.
pub const FALLBACK_REPLY: &str =
    "I apologize, but I'm having trouble processing your request right now. Please try again later.";

/// Reply used when no usable API key is configured.
pub const CONFIGURATION_REPLY: &str = "SuperGPT is not connected to an AI provider yet. \
To enable responses, create an API key (for Gemini: https://aistudio.google.com/app/apikey, \
for OpenAI: https://platform.openai.com/api-keys), export it as SUPERGPT_API_KEY \
(or GEMINI_API_KEY / OPENAI_API_KEY), and restart SuperGPT.";

/// The text capability, or the reason it is unavailable.
pub enum TextBackend {
    Ready(BoxLlmProvider),
    /// No usable credential; detected before any network call.
    Unconfigured { provider: String, env_var: String },
}

/// Default square size for generated and placeholder images.
const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

/// Delegates chat replies and image generation to external providers.
pub struct ResponseOrchestrator {
    text: TextBackend,
    images: Option<BoxImageProvider>,
    settings: PromptSettings,
    image_size: String,
}

impl ResponseOrchestrator {
    pub fn new(text: TextBackend, images: Option<BoxImageProvider>, settings: PromptSettings) -> Self {
        Self {
            text,
            images,
            settings,
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
        }
    }

    /// Size used in placeholder URLs (should match the provider's size).
    pub fn with_image_size(mut self, size: impl Into<String>) -> Self {
        self.image_size = size.into();
        self
    }

    pub fn settings(&self) -> &PromptSettings {
        &self.settings
    }

    /// Name and model of the text provider, if one is configured.
    pub fn text_provider(&self) -> Option<(&str, &str)> {
        match &self.text {
            TextBackend::Ready(provider) => Some((provider.name(), provider.model())),
            TextBackend::Unconfigured { .. } => None,
        }
    }

    /// Name of the image provider, if one is configured.
    pub fn image_provider(&self) -> Option<&str> {
        self.images.as_ref().map(|p| p.name())
    }

    /// Produce the assistant reply for `user_text`.
    ///
    /// `prior_turns` is the history preceding this exchange; only the most
    /// recent window of it is sent. Never fails.
    pub async fn respond(&self, user_text: &str, prior_turns: &[Turn], persona: Persona) -> String {
        let provider = match &self.text {
            TextBackend::Ready(provider) => provider,
            TextBackend::Unconfigured { provider, env_var } => {
                warn!(
                    provider = %provider,
                    env_var = %env_var,
                    error_kind = "missing_credential",
                    "Text provider not configured; returning setup instructions"
                );
                return CONFIGURATION_REPLY.to_string();
            }
        };

        let request = build_request(persona, user_text, prior_turns, &self.settings);
        let span = info_span!(
            "chat",
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = provider.name(),
            gen_ai.request.model = provider.model(),
            gen_ai.request.max_tokens = request.max_tokens,
            persona = %persona,
        );

        async {
            let start = Instant::now();
            match provider.complete(&request).await {
                Ok(response) => {
                    info!(
                        gen_ai.response.id = %response.id,
                        gen_ai.usage.input_tokens = response.usage.input_tokens,
                        gen_ai.usage.output_tokens = response.usage.output_tokens,
                        gen_ai.response.finish_reasons = %response.stop_reason,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Completion received"
                    );
                    response.content
                }
                Err(err @ LlmError::MissingCredential { .. }) => {
                    warn!(error = %err, error_kind = err.kind(), "Provider rejected missing credential");
                    CONFIGURATION_REPLY.to_string()
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        error_kind = err.kind(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Completion failed; returning fallback reply"
                    );
                    FALLBACK_REPLY.to_string()
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Generate an image for `prompt`, or a deterministic placeholder.
    ///
    /// Never fails.
    pub async fn generate_image(&self, prompt: &str) -> ImageReference {
        let submitted = apply_style_suffix(prompt);

        let Some(provider) = &self.images else {
            warn!(error_kind = "missing_credential", "Image provider not configured; using placeholder");
            return placeholder_reference(prompt, &submitted, &self.image_size);
        };

        let span = info_span!(
            "generate_image",
            gen_ai.operation.name = "generate_image",
            gen_ai.provider.name = provider.name(),
            styled = submitted.len() != prompt.len(),
        );

        async {
            let request = ImageRequest {
                prompt: submitted.clone(),
            };
            match provider.generate(&request).await {
                Ok(image) => {
                    info!("Image generated");
                    ImageReference {
                        url: image.url,
                        source: ImageSource::Generated,
                        submitted_prompt: submitted.clone(),
                        revised_prompt: image.revised_prompt,
                    }
                }
                Err(err) => {
                    warn!(error = %err, error_kind = err.kind(), "Image generation failed; using placeholder");
                    placeholder_reference(prompt, &submitted, &self.image_size)
                }
            }
        }
        .instrument(span)
        .await
    }
}
