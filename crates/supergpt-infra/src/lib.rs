//! Infrastructure layer for SuperGPT.
//!
//! Contains implementations of the provider traits defined in `supergpt-core`
//! (OpenAI-compatible chat completions, OpenAI image generation), environment
//! credential resolution, and configuration file loading.

pub mod config;
mod http_error;
pub mod image;
pub mod llm;
pub mod secret;
