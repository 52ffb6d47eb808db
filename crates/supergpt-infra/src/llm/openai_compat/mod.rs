//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves OpenAI, Google Gemini and
//! Mistral (plus any custom endpoint) via configurable base URLs and factory
//! functions. Requests go straight through `reqwest`; a failed call is
//! reported once and never retried.

pub mod config;
mod types;

use secrecy::{ExposeSecret, SecretString};

use supergpt_core::llm::provider::LlmProvider;
use supergpt_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, ProviderCapabilities,
    StopReason, Usage,
};

use self::config::OpenAiCompatConfig;
use self::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::http_error::{classify_error, classify_transport};

/// Unified provider for any OpenAI-compatible chat completions API.
///
/// # API Key Security
///
/// The key is held as a [`SecretString`] and only exposed when building the
/// `Authorization` header. The type does not implement `Debug`.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    provider_name: String,
    model: String,
    capabilities: ProviderCapabilities,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            provider_name: config.provider_name,
            model: config.model,
            capabilities: config.capabilities,
        })
    }

    /// Build the wire request from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref system) = request.system {
            messages.push(ChatMessage {
                role: MessageRole::System.to_string(),
                content: system.clone(),
            });
        }

        messages.extend(request.messages.iter().map(|m| ChatMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        }));

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        ChatCompletionRequest {
            model,
            messages,
            max_tokens: (request.max_tokens > 0).then_some(request.max_tokens),
            temperature: request.temperature,
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.build_request(request);

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

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            LlmError::Deserialization("response contained no choices".to_string())
        })?;

        let stop_reason = match choice.finish_reason.as_deref() {
            Some("length") => StopReason::MaxTokens,
            Some("content_filter") => StopReason::ContentFilter,
            Some("stop_sequence") => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        };

        let content = match (choice.message.content, choice.message.refusal) {
            (Some(text), _) if !text.is_empty() => text,
            (_, Some(refusal)) => return Err(LlmError::ContentPolicy(refusal)),
            _ if stop_reason == StopReason::ContentFilter => {
                return Err(LlmError::ContentPolicy(
                    "response withheld by content filter".to_string(),
                ));
            }
            (text, None) => text.unwrap_or_default(),
        };

        let usage = completion
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: completion.id,
            content,
            model: completion.model,
            stop_reason,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::config::{gemini_defaults, mistral_defaults, openai_defaults};
    use supergpt_types::llm::Message;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key() -> SecretString {
        SecretString::from("sk-test".to_string())
    }

    fn provider_for(server: &MockServer) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(config::custom_defaults(
            "test",
            &server.uri(),
            key(),
            "test-model",
        ))
        .unwrap()
    }

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest {
            model: String::new(),
            messages: vec![Message {
                role: MessageRole::User,
                content: text.to_string(),
            }],
            system: Some("You are SuperGPT".to_string()),
            max_tokens: 256,
            temperature: None,
        }
    }

    fn success_body(content: &str, finish_reason: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "test-model",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content, "refusal": null },
                "finish_reason": finish_reason,
                "logprobs": null
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19 }
        })
    }

    #[test]
    fn test_openai_factory() {
        let provider = OpenAiCompatibleProvider::new(openai_defaults(key(), "gpt-4o-mini")).unwrap();
        assert_eq!(LlmProvider::name(&provider), "openai");
        assert_eq!(LlmProvider::model(&provider), "gpt-4o-mini");
        assert_eq!(provider.url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_gemini_factory() {
        let provider = OpenAiCompatibleProvider::new(gemini_defaults(key(), "gemini-2.0-flash")).unwrap();
        assert_eq!(LlmProvider::name(&provider), "gemini");
        assert_eq!(
            provider.url(),
            "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
        );
    }

    #[test]
    fn test_mistral_factory() {
        let provider = OpenAiCompatibleProvider::new(mistral_defaults(key(), "mistral-small-latest")).unwrap();
        assert_eq!(LlmProvider::name(&provider), "mistral");
    }

    #[test]
    fn test_build_request_messages() {
        let provider = OpenAiCompatibleProvider::new(openai_defaults(key(), "gpt-4o-mini")).unwrap();
        let mut req = request("Hello");
        req.messages.push(Message {
            role: MessageRole::Assistant,
            content: "Hi!".to_string(),
        });

        let wire = provider.build_request(&req);
        assert_eq!(wire.model, "gpt-4o-mini");
        assert_eq!(wire.messages.len(), 3);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[0].content, "You are SuperGPT");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.messages[2].role, "assistant");
        assert_eq!(wire.max_tokens, Some(256));
    }

    #[test]
    fn test_build_request_explicit_model_wins() {
        let provider = OpenAiCompatibleProvider::new(openai_defaults(key(), "gpt-4o-mini")).unwrap();
        let mut req = request("Hello");
        req.model = "gpt-4o".to_string();
        req.system = None;

        let wire = provider.build_request(&req);
        assert_eq!(wire.model, "gpt-4o");
        assert_eq!(wire.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({ "model": "test-model" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("A walnut desk.", "stop")))
            .expect(1)
            .mount(&server)
            .await;

        let response = provider_for(&server).complete(&request("Suggest a desk")).await.unwrap();
        assert_eq!(response.content, "A walnut desk.");
        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert_eq!(response.usage.input_tokens, 12);
        assert_eq!(response.usage.output_tokens, 7);
    }

    #[tokio::test]
    async fn test_complete_length_finish() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Partial", "length")))
            .mount(&server)
            .await;

        let response = provider_for(&server).complete(&request("Long answer")).await.unwrap();
        assert_eq!(response.stop_reason, StopReason::MaxTokens);
    }

    #[tokio::test]
    async fn test_complete_content_filter_without_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("", "content_filter")))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete(&request("...")).await.unwrap_err();
        assert!(matches!(err, LlmError::ContentPolicy(_)));
    }

    #[tokio::test]
    async fn test_complete_quota_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {
                    "message": "You exceeded your current quota.",
                    "type": "insufficient_quota",
                    "code": "insufficient_quota"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = provider_for(&server).complete(&request("Hi")).await.unwrap_err();
        assert!(matches!(err, LlmError::QuotaExceeded(_)));
    }

    #[tokio::test]
    async fn test_complete_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Incorrect API key provided", "code": "invalid_api_key" }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete(&request("Hi")).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete(&request("Hi")).await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_complete_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(success_body("late", "stop"))
                    .set_delay(std::time::Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let mut cfg = config::custom_defaults("test", &server.uri(), key(), "test-model");
        cfg.timeout = std::time::Duration::from_millis(100);
        let provider = OpenAiCompatibleProvider::new(cfg).unwrap();

        let err = provider.complete(&request("Hi")).await.unwrap_err();
        assert!(matches!(err, LlmError::Timeout));
    }
}
