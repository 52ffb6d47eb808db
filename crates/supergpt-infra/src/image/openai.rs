//! OpenAiImageProvider -- concrete [`ImageProvider`] for the OpenAI Images API.
//!
//! Always requests a single image returned as a URL. The API key is wrapped
//! in [`SecretString`] and only exposed in the `Authorization` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use supergpt_core::image::provider::ImageProvider;
use supergpt_types::image::{GeneratedImage, ImageRequest};
use supergpt_types::llm::LlmError;

use super::types::{ImageGenerationRequest, ImageGenerationResponse};
use crate::http_error::{classify_error, classify_transport};

/// OpenAI image generation (DALL-E).
pub struct OpenAiImageProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    size: String,
}

impl OpenAiImageProvider {
    pub fn new(
        api_key: SecretString,
        base_url: &str,
        model: &str,
        size: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            size: size.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }
}

// No Debug: see OpenAiCompatibleProvider.

impl ImageProvider for OpenAiImageProvider {
    fn name(&self) -> &str {
        "openai-images"
    }

    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, LlmError> {
        let body = ImageGenerationRequest {
            model: &self.model,
            prompt: &request.prompt,
            n: 1,
            size: &self.size,
            response_format: "url",
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(classify_error(status.as_u16(), &error_body));
        }

        let generated: ImageGenerationResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse image response: {e}"))
        })?;

        let image = generated
            .data
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Deserialization("response contained no images".into()))?;

        let url = image
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| LlmError::Deserialization("image entry has no url".into()))?;

        Ok(GeneratedImage {
            url,
            revised_prompt: image.revised_prompt,
        })
    }
}
