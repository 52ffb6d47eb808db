//! Text-generation provider abstractions.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `prompt`: persona + bounded history prompt composition

pub mod box_provider;
pub mod prompt;
pub mod provider;
