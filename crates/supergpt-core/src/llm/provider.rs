//! LlmProvider trait definition.
//!
//! This is the core abstraction that all text-generation providers implement.

use supergpt_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

/// Trait for text-generation backends (Gemini, OpenAI, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Implementations
/// live in supergpt-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Model identifier used when a request does not override it.
    fn model(&self) -> &str;

    /// What this provider supports.
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
