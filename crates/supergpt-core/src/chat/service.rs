//! Chat service: the caller side of the response orchestrator.
//!
//! `ChatService` owns the per-session "awaiting response" gate (the send
//! button state), records user and assistant turns in the `SessionStore`,
//! and drops replies that arrive after the session was reset.

use std::sync::Arc;

use dashmap::DashSet;
use tracing::{debug, info};

use supergpt_types::chat::Turn;
use supergpt_types::error::ChatError;
use supergpt_types::image::ImageReference;
use supergpt_types::persona::Persona;

use crate::chat::store::SessionStore;
use crate::orchestrator::ResponseOrchestrator;

/// Coordinates sends across sessions.
pub struct ChatService {
    store: Arc<SessionStore>,
    orchestrator: Arc<ResponseOrchestrator>,
    awaiting: DashSet<String>,
}

/// Clears the awaiting flag for a session when dropped.
struct AwaitingGuard<'a> {
    awaiting: &'a DashSet<String>,
    session_key: String,
}

impl Drop for AwaitingGuard<'_> {
    fn drop(&mut self) {
        self.awaiting.remove(&self.session_key);
    }
}

impl ChatService {
    pub fn new(store: Arc<SessionStore>, orchestrator: Arc<ResponseOrchestrator>) -> Self {
        Self {
            store,
            orchestrator,
            awaiting: DashSet::new(),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn orchestrator(&self) -> &Arc<ResponseOrchestrator> {
        &self.orchestrator
    }

    /// Whether the session has a request outstanding.
    pub fn is_awaiting(&self, session_key: &str) -> bool {
        self.awaiting.contains(session_key)
    }

    /// Current turns of the session.
    pub fn history(&self, session_key: &str) -> Vec<Turn> {
        self.store.read(session_key)
    }

    /// Clear the session. Replies still in flight for it will be dropped.
    pub fn reset(&self, session_key: &str) -> u64 {
        self.store.reset(session_key)
    }

    fn begin(&self, session_key: &str) -> Result<AwaitingGuard<'_>, ChatError> {
        if !self.awaiting.insert(session_key.to_string()) {
            return Err(ChatError::Busy(session_key.to_string()));
        }
        Ok(AwaitingGuard {
            awaiting: &self.awaiting,
            session_key: session_key.to_string(),
        })
    }

    /// Send a user message and record the assistant's reply.
    ///
    /// Returns the appended assistant turn, or `None` when the session was
    /// reset before the reply arrived.
    pub async fn send(
        &self,
        session_key: &str,
        persona: Persona,
        user_text: &str,
    ) -> Result<Option<Turn>, ChatError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let _guard = self.begin(session_key)?;

        let generation = self.store.generation(session_key);
        let prior = self.store.read(session_key);
        if !self.store.append_if_current(session_key, generation, Turn::user(text)) {
            return Ok(None);
        }

        let reply = self.orchestrator.respond(text, &prior, persona).await;
        let turn = Turn::assistant(reply);
        if self.store.append_if_current(session_key, generation, turn.clone()) {
            debug!(session_key, turns = self.store.len(session_key), "Exchange recorded");
            Ok(Some(turn))
        } else {
            info!(session_key, "Session was reset while awaiting a reply; reply discarded");
            Ok(None)
        }
    }

    /// Generate an image and record the exchange in the session.
    ///
    /// The user turn holds the prompt; the assistant turn holds the image URL.
    /// Returns the image reference even if the session was reset meanwhile.
    pub async fn generate_image(
        &self,
        session_key: &str,
        prompt: &str,
    ) -> Result<ImageReference, ChatError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let _guard = self.begin(session_key)?;

        let generation = self.store.generation(session_key);
        self.store.append_if_current(session_key, generation, Turn::user(prompt));

        let image = self.orchestrator.generate_image(prompt).await;
        if !self
            .store
            .append_if_current(session_key, generation, Turn::assistant(image.url.clone()))
        {
            info!(session_key, "Session was reset while generating an image; result not recorded");
        }
        Ok(image)
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("store", &self.store)
            .field("awaiting", &self.awaiting.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::sync::Semaphore;

    use crate::image::provider::BoxImageProvider;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::prompt::PromptSettings;
    use crate::orchestrator::{FALLBACK_REPLY, TextBackend};
    use crate::testing::{ScriptedImages, ScriptedLlm};
    use supergpt_types::chat::Sender;
    use supergpt_types::llm::LlmError;

    fn service(llm: ScriptedLlm) -> Arc<ChatService> {
        let orchestrator = ResponseOrchestrator::new(
            TextBackend::Ready(BoxLlmProvider::new(llm)),
            None,
            PromptSettings::default(),
        );
        Arc::new(ChatService::new(
            Arc::new(SessionStore::new()),
            Arc::new(orchestrator),
        ))
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) {
        for _ in 0..200 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn send_records_user_and_assistant_turns() {
        let svc = service(ScriptedLlm::replying("We have oak and walnut."));
        let turn = svc
            .send("main", Persona::ChatAssistant, "  Which woods?  ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(turn.text, "We have oak and walnut.");

        let history = svc.history("main");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sender, Sender::User);
        assert_eq!(history[0].text, "Which woods?");
        assert_eq!(history[1].sender, Sender::Assistant);
        assert!(!svc.is_awaiting("main"));
    }

    #[tokio::test]
    async fn send_passes_prior_history_without_new_message() {
        let llm = ScriptedLlm::replying("ok");
        let svc = service(llm.clone());
        svc.send("main", Persona::ChatAssistant, "first").await.unwrap();
        svc.send("main", Persona::ChatAssistant, "second").await.unwrap();

        let prompt = llm.last_request().unwrap().messages[0].content.clone();
        assert_eq!(
            prompt,
            "Previous conversation:\nUser: first\nAssistant: ok\n\nUser: second\nAssistant:"
        );
    }

    #[tokio::test]
    async fn send_rejects_blank_input() {
        let llm = ScriptedLlm::replying("unused");
        let svc = service(llm.clone());
        assert_eq!(
            svc.send("main", Persona::ChatAssistant, "   ").await,
            Err(ChatError::EmptyMessage)
        );
        assert_eq!(llm.call_count(), 0);
        assert!(svc.history("main").is_empty());
    }

    #[tokio::test]
    async fn send_failure_appends_fallback_turn() {
        let svc = service(ScriptedLlm::failing(|| LlmError::Timeout));
        let turn = svc
            .send("main", Persona::ChatAssistant, "hello")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(turn.text, FALLBACK_REPLY);
        assert_eq!(svc.history("main").len(), 2);
    }

    #[tokio::test]
    async fn second_send_while_awaiting_is_busy() {
        let gate = Arc::new(Semaphore::new(0));
        let svc = service(ScriptedLlm::replying("done").gated(gate.clone()));

        let first = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.send("main", Persona::ChatAssistant, "one").await })
        };
        wait_until(|| svc.is_awaiting("main")).await;

        assert_eq!(
            svc.send("main", Persona::ChatAssistant, "two").await,
            Err(ChatError::Busy("main".to_string()))
        );

        gate.add_permits(1);
        let turn = first.await.unwrap().unwrap().unwrap();
        assert_eq!(turn.text, "done");
        assert!(!svc.is_awaiting("main"));
        assert_eq!(svc.history("main").len(), 2);
    }

    #[tokio::test]
    async fn other_sessions_are_not_blocked() {
        let gate = Arc::new(Semaphore::new(0));
        let llm = ScriptedLlm::replying("done").gated(gate.clone());
        let svc = service(llm);

        let main = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.send("main", Persona::ChatAssistant, "one").await })
        };
        wait_until(|| svc.is_awaiting("main")).await;

        let render = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.send("render", Persona::RenderAssistant, "two").await })
        };
        wait_until(|| svc.is_awaiting("render")).await;

        gate.add_permits(2);
        assert!(main.await.unwrap().unwrap().is_some());
        assert!(render.await.unwrap().unwrap().is_some());
    }

    #[tokio::test]
    async fn reset_while_awaiting_discards_reply() {
        let gate = Arc::new(Semaphore::new(0));
        let svc = service(ScriptedLlm::replying("late").gated(gate.clone()));

        let pending = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.send("main", Persona::ChatAssistant, "question").await })
        };
        wait_until(|| svc.history("main").len() == 1).await;

        svc.reset("main");
        gate.add_permits(1);

        assert_eq!(pending.await.unwrap(), Ok(None));
        assert!(svc.history("main").is_empty());
        assert!(!svc.is_awaiting("main"));
    }

    #[tokio::test]
    async fn generate_image_records_exchange() {
        let orchestrator = ResponseOrchestrator::new(
            TextBackend::Unconfigured {
                provider: "gemini".into(),
                env_var: "SUPERGPT_API_KEY".into(),
            },
            Some(BoxImageProvider::new(ScriptedImages::replying("https://img.example/a.png"))),
            PromptSettings::default(),
        );
        let svc = ChatService::new(Arc::new(SessionStore::new()), Arc::new(orchestrator));

        let image = svc.generate_image("library", "teak sideboard").await.unwrap();
        assert_eq!(image.url, "https://img.example/a.png");

        let history = svc.history("library");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "teak sideboard");
        assert_eq!(history[1].text, "https://img.example/a.png");
    }
}
