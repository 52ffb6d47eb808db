//! LLM request/response types for SuperGPT.
//!
//! These types model the data shapes for text-generation provider
//! interactions: completion requests, usage tracking, and the error taxonomy
//! the orchestrator folds into fallback replies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Request to an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model override; empty means "use the provider's configured model".
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from an LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Reason why the LLM stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    ContentFilter,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndTurn => write!(f, "end_turn"),
            StopReason::MaxTokens => write!(f, "max_tokens"),
            StopReason::StopSequence => write!(f, "stop_sequence"),
            StopReason::ContentFilter => write!(f, "content_filter"),
        }
    }
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from text and image provider operations.
///
/// `MissingCredential` is raised before any network traffic. Every other
/// variant comes back from (or on the way to) the provider.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("no usable API key configured for {provider} (set {env_var})")]
    MissingCredential { provider: String, env_var: String },

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("content policy violation: {0}")]
    ContentPolicy(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("request timed out")]
    Timeout,

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl LlmError {
    /// Short, stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::MissingCredential { .. } => "missing_credential",
            LlmError::QuotaExceeded(_) => "quota_exceeded",
            LlmError::AuthenticationFailed => "authentication_failed",
            LlmError::ContentPolicy(_) => "content_policy",
            LlmError::RateLimited { .. } => "rate_limited",
            LlmError::Timeout => "timeout",
            LlmError::Provider { .. } => "provider",
            LlmError::Deserialization(_) => "deserialization",
            LlmError::InvalidRequest(_) => "invalid_request",
        }
    }
}

/// Capabilities of an LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub streaming: bool,
    pub vision: bool,
    pub max_context_tokens: u32,
    pub max_output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_display() {
        assert_eq!(MessageRole::System.to_string(), "system");
        assert_eq!(MessageRole::User.to_string(), "user");
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_stop_reason_serde() {
        let reason = StopReason::ContentFilter;
        let json = serde_json::to_string(&reason).unwrap();
        assert_eq!(json, "\"content_filter\"");
        let parsed: StopReason = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, StopReason::ContentFilter);
    }

    #[test]
    fn test_completion_request_skips_empty_optionals() {
        let request = CompletionRequest {
            model: String::new(),
            messages: vec![],
            system: None,
            max_tokens: 16,
            temperature: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("system"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_llm_error_kind() {
        assert_eq!(LlmError::AuthenticationFailed.kind(), "authentication_failed");
        assert_eq!(LlmError::QuotaExceeded("billing".into()).kind(), "quota_exceeded");
        assert_eq!(LlmError::Timeout.kind(), "timeout");
    }

    #[test]
    fn test_missing_credential_display_names_env_var() {
        let err = LlmError::MissingCredential {
            provider: "gemini".to_string(),
            env_var: "SUPERGPT_API_KEY".to_string(),
        };
        assert!(err.to_string().contains("SUPERGPT_API_KEY"));
        assert!(err.to_string().contains("gemini"));
    }
}
