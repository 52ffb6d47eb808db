//! Shared domain types for SuperGPT.
//!
//! This crate contains the core domain types used across the SuperGPT
//! assistant: chat turns and session events, personas, LLM request/response
//! shapes, image references, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod image;
pub mod llm;
pub mod persona;
