//! Line input for the chat loop.
//!
//! Up-arrow recall is kept per session: switching with `/session` or
//! `/persona` swaps the readline history for that session's lines, and the
//! prompt shows the session key when it differs from the persona's default.

use std::collections::{HashMap, VecDeque};

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use supergpt_types::persona::Persona;

/// Lines remembered per session for up-arrow recall.
const RECALL_LIMIT: usize = 200;

#[derive(Debug)]
pub enum InputEvent {
    /// A submitted line, trimmed.
    Message(String),
    /// Ctrl+D, or the terminal went away.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

/// Prompt text for the given persona and session.
pub fn prompt_for(persona: Persona, session_key: &str) -> String {
    let label = if session_key == persona.default_session_key() {
        "You".to_string()
    } else {
        format!("You@{session_key}")
    };
    format!("  {} ", style(format!("{label} >")).green().bold())
}

/// Submitted lines grouped by session key.
#[derive(Debug, Default)]
struct SessionRecall {
    lines: HashMap<String, VecDeque<String>>,
}

impl SessionRecall {
    fn record(&mut self, session_key: &str, line: &str) {
        let lines = self.lines.entry(session_key.to_string()).or_default();
        if lines.back().is_some_and(|last| last == line) {
            return;
        }
        if lines.len() == RECALL_LIMIT {
            lines.pop_front();
        }
        lines.push_back(line.to_string());
    }

    fn lines(&self, session_key: &str) -> Vec<String> {
        self.lines
            .get(session_key)
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Readline bound to the active persona and session.
pub struct ChatInput {
    rl: Readline,
    session_key: String,
    recall: SessionRecall,
}

impl ChatInput {
    /// The returned `SharedWriter` must outlive the readline.
    pub fn new(persona: Persona, session_key: &str) -> Result<(Self, SharedWriter), ReadlineError> {
        let (mut rl, writer) = Readline::new(prompt_for(persona, session_key))?;
        rl.set_max_history(RECALL_LIMIT);
        let input = Self {
            rl,
            session_key: session_key.to_string(),
            recall: SessionRecall::default(),
        };
        Ok((input, writer))
    }

    /// Make `session_key` the active session, restoring its recall history.
    pub fn switch_to(&mut self, persona: Persona, session_key: &str) {
        self.session_key = session_key.to_string();
        self.rl.set_history_entries(self.recall.lines(session_key));
        let _ = self.rl.update_prompt(&prompt_for(persona, session_key));
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    self.recall.record(&self.session_key, &line);
                    let _ = self.rl.add_history_entry(line.clone());
                }
                InputEvent::Message(line)
            }
            Ok(ReadlineEvent::Eof) | Err(_) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
        }
    }

    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}
