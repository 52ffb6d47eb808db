//! Application state wiring the store, orchestrator and providers together.
//!
//! The session store is created here and injected into the chat service;
//! nothing else in the process holds conversation state.

use std::path::PathBuf;
use std::sync::Arc;

use supergpt_core::chat::service::ChatService;
use supergpt_core::chat::store::SessionStore;
use supergpt_core::llm::prompt::PromptSettings;
use supergpt_core::orchestrator::ResponseOrchestrator;
use supergpt_infra::config::{load_effective_config, resolve_home_dir};
use supergpt_infra::image::create_image_provider;
use supergpt_infra::llm::create_text_backend;
use supergpt_infra::secret::env::EnvSecretProvider;
use supergpt_infra::secret::{image_key_candidates, text_key_candidates};
use supergpt_types::config::AppConfig;

/// Shared application state.
pub struct AppState {
    pub home_dir: PathBuf,
    pub config: AppConfig,
    pub chat_service: Arc<ChatService>,
    /// Environment variable the text key was read from, if any.
    pub text_key_source: Option<String>,
    /// Environment variable the image key was read from, if any.
    pub image_key_source: Option<String>,
}

impl AppState {
    /// Load configuration, resolve credentials and wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let home_dir = resolve_home_dir();
        let config = load_effective_config(&home_dir).await;

        let secrets = EnvSecretProvider::new();
        let text_key = secrets.resolve(&text_key_candidates(&config.text.provider));
        let image_key = secrets.resolve(&image_key_candidates());
        let text_key_source = text_key.as_ref().map(|k| k.env_var.clone());
        let image_key_source = image_key.as_ref().map(|k| k.env_var.clone());

        let text = create_text_backend(&config.text, text_key)?;
        let images = create_image_provider(&config.image, image_key)?;

        let settings = PromptSettings {
            history_window: config.effective_history_window(),
            max_tokens: config.text.max_tokens,
            temperature: config.text.temperature,
        };
        let orchestrator =
            ResponseOrchestrator::new(text, images, settings).with_image_size(config.image.size.clone());

        let store = Arc::new(SessionStore::new());
        let chat_service = Arc::new(ChatService::new(store, Arc::new(orchestrator)));

        tracing::debug!(home_dir = %home_dir.display(), "Application state initialized");

        Ok(Self {
            home_dir,
            config,
            chat_service,
            text_key_source,
            image_key_source,
        })
    }

    /// Model label for banners and footers.
    pub fn model_label(&self) -> String {
        match self.chat_service.orchestrator().text_provider() {
            Some((provider, model)) => format!("{model} ({provider})"),
            None => format!("{} (not configured)", self.config.text.model),
        }
    }
}
