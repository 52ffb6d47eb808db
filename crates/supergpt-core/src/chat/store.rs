//! In-memory session store.
//!
//! Maps a session key to an append-only sequence of turns. Sessions are
//! created implicitly on first append and are never deleted; `reset` empties
//! a session and advances its generation so that responses started before the
//! reset can be recognised as stale and dropped.
//!
//! Changes are published on a `tokio::sync::broadcast` channel. Publishing
//! with no subscribers is a no-op.

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use supergpt_types::chat::{SessionEvent, Turn};

/// Default broadcast capacity for session events.
const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct SessionState {
    generation: u64,
    turns: Vec<Turn>,
}

/// Single source of truth for all per-surface conversation histories.
///
/// Explicitly owned and shared via `Arc`; there is no global instance.
pub struct SessionStore {
    sessions: DashMap<String, SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            sessions: DashMap::new(),
            events,
        }
    }

    /// Append `turn` to `session_key`, creating the session if absent.
    pub fn append(&self, session_key: &str, turn: Turn) {
        let mut state = self.sessions.entry(session_key.to_string()).or_default();
        state.turns.push(turn.clone());
        let index = state.turns.len() - 1;
        // Published under the entry lock so subscribers see per-session order.
        self.publish(SessionEvent::TurnAppended {
            session_key: session_key.to_string(),
            index,
            turn,
        });
    }

    /// Append `turn` only if the session is still at `generation`.
    ///
    /// Returns whether the turn was appended.
    pub fn append_if_current(&self, session_key: &str, generation: u64, turn: Turn) -> bool {
        let mut state = self.sessions.entry(session_key.to_string()).or_default();
        if state.generation != generation {
            debug!(
                session_key,
                expected = generation,
                current = state.generation,
                "Dropping stale turn"
            );
            return false;
        }
        state.turns.push(turn.clone());
        let index = state.turns.len() - 1;
        self.publish(SessionEvent::TurnAppended {
            session_key: session_key.to_string(),
            index,
            turn,
        });
        true
    }

    /// Replace the session's turns with an empty sequence.
    ///
    /// The session keeps existing. Returns the new generation.
    pub fn reset(&self, session_key: &str) -> u64 {
        let mut state = self.sessions.entry(session_key.to_string()).or_default();
        state.turns.clear();
        state.generation += 1;
        let generation = state.generation;
        debug!(session_key, generation, "Session reset");
        self.publish(SessionEvent::SessionReset {
            session_key: session_key.to_string(),
            generation,
        });
        generation
    }

    /// Current turns of the session, or an empty sequence for unseen keys.
    ///
    /// Does not create the session.
    pub fn read(&self, session_key: &str) -> Vec<Turn> {
        self.sessions
            .get(session_key)
            .map(|state| state.turns.clone())
            .unwrap_or_default()
    }

    /// Current generation of the session (0 for unseen keys).
    pub fn generation(&self, session_key: &str) -> u64 {
        self.sessions
            .get(session_key)
            .map(|state| state.generation)
            .unwrap_or(0)
    }

    /// Number of turns in the session (0 for unseen keys).
    pub fn len(&self, session_key: &str) -> usize {
        self.sessions
            .get(session_key)
            .map(|state| state.turns.len())
            .unwrap_or(0)
    }

    /// Whether the session has no turns (true for unseen keys).
    pub fn is_empty(&self, session_key: &str) -> bool {
        self.len(session_key) == 0
    }

    /// Keys of every session that exists, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.sessions.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Receive all future session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.sessions.len())
            .field("subscribers", &self.events.receiver_count())
            .finish()
    }
}
