//! Per-surface conversation state.
//!
//! - `store`: the in-memory `SessionStore` (append / reset / read)
//! - `service`: `ChatService`, which gates sends per session and routes
//!   exchanges through the response orchestrator

pub mod service;
pub mod store;
