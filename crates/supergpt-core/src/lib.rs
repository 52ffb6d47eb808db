//! Business logic and provider trait definitions for SuperGPT.
//!
//! This crate defines the "ports" (provider traits) that the infrastructure
//! layer implements, the in-memory session store, and the response
//! orchestrator. It depends only on `supergpt-types` -- never on
//! `supergpt-infra` or any HTTP crate.

pub mod chat;
pub mod image;
pub mod llm;
pub mod orchestrator;

#[cfg(test)]
pub(crate) mod testing;
