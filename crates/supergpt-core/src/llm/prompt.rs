//! Prompt composition for the response orchestrator.
//!
//! The provider receives the persona as its system instruction and a single
//! user message containing a bounded window of recent history followed by
//! the new user message:
//!
//! ```text
//! Previous conversation:
//! User: ...
//! Assistant: ...
//!
//! User: <new message>
//! Assistant:
//! ```

use supergpt_types::chat::Turn;
use supergpt_types::config::MAX_HISTORY_WINDOW;
use supergpt_types::llm::{CompletionRequest, Message, MessageRole};
use supergpt_types::persona::Persona;

/// Generation parameters that travel with every text request.
#[derive(Debug, Clone)]
pub struct PromptSettings {
    /// Prior turns included as context (clamped to [`MAX_HISTORY_WINDOW`]).
    pub history_window: usize,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            history_window: MAX_HISTORY_WINDOW,
            max_tokens: 1024,
            temperature: None,
        }
    }
}

/// The most recent `window` turns of `prior`, oldest first.
///
/// `window` is clamped to [`MAX_HISTORY_WINDOW`] regardless of the caller.
pub fn history_window(prior: &[Turn], window: usize) -> &[Turn] {
    let window = window.min(MAX_HISTORY_WINDOW);
    let start = prior.len().saturating_sub(window);
    &prior[start..]
}

fn speaker(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "System",
        MessageRole::User => "User",
        MessageRole::Assistant => "Assistant",
    }
}

/// Render the history window and the new message as one prompt string.
pub fn compose_prompt(user_text: &str, prior: &[Turn], window: usize) -> String {
    let recent = history_window(prior, window);
    let mut prompt = String::new();

    if !recent.is_empty() {
        prompt.push_str("Previous conversation:\n");
        for turn in recent {
            prompt.push_str(speaker(MessageRole::from(turn.sender)));
            prompt.push_str(": ");
            prompt.push_str(&turn.text);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str("User: ");
    prompt.push_str(user_text);
    prompt.push_str("\nAssistant:");
    prompt
}

/// Build the provider request for one exchange.
pub fn build_request(
    persona: Persona,
    user_text: &str,
    prior: &[Turn],
    settings: &PromptSettings,
) -> CompletionRequest {
    CompletionRequest {
        model: String::new(),
        messages: vec![Message {
            role: MessageRole::User,
            content: compose_prompt(user_text, prior, settings.history_window),
        }],
        system: Some(persona.instruction().to_string()),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    }
}
