//! Scripted providers shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use supergpt_types::image::{GeneratedImage, ImageRequest};
use supergpt_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use crate::image::provider::ImageProvider;
use crate::llm::provider::LlmProvider;

/// What a scripted provider does when called.
#[derive(Clone, Copy)]
pub enum Script {
    Reply(&'static str),
    Fail(fn() -> LlmError),
}

/// Text provider that records requests and follows a script.
///
/// When a gate is set, `complete` waits for a permit before answering.
#[derive(Clone)]
pub struct ScriptedLlm {
    script: Script,
    capabilities: ProviderCapabilities,
    pub calls: Arc<AtomicUsize>,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
    pub gate: Option<Arc<Semaphore>>,
}

impl ScriptedLlm {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            capabilities: ProviderCapabilities {
                streaming: false,
                vision: false,
                max_context_tokens: 32_000,
                max_output_tokens: 1_024,
            },
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn replying(text: &'static str) -> Self {
        Self::new(Script::Reply(text))
    }

    pub fn failing(err: fn() -> LlmError) -> Self {
        Self::new(Script::Fail(err))
    }

    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        match self.script {
            Script::Reply(text) => Ok(CompletionResponse {
                id: "resp-1".to_string(),
                content: text.to_string(),
                model: "scripted-model".to_string(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            }),
            Script::Fail(err) => Err(err()),
        }
    }
}

/// Image provider that records prompts and follows a script.
#[derive(Clone)]
pub struct ScriptedImages {
    script: Script,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedImages {
    pub fn replying(url: &'static str) -> Self {
        Self {
            script: Script::Reply(url),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(err: fn() -> LlmError) -> Self {
        Self {
            script: Script::Fail(err),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl ImageProvider for ScriptedImages {
    fn name(&self) -> &str {
        "scripted-images"
    }

    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, LlmError> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        match self.script {
            Script::Reply(url) => Ok(GeneratedImage {
                url: url.to_string(),
                revised_prompt: None,
            }),
            Script::Fail(err) => Err(err()),
        }
    }
}
