//! Environment variable credential provider.
//!
//! Read-only: keys are set via shell config, never written by SuperGPT.

use super::{ResolvedKey, resolve_key};

/// Reads credentials from the process environment.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }

    /// Value of `key`, treating non-Unicode values as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(val) => Some(val),
            Err(std::env::VarError::NotPresent) => None,
            // Secrets must be valid strings; treat invalid Unicode as not found.
            Err(std::env::VarError::NotUnicode(_)) => None,
        }
    }

    /// First usable key among `candidates`.
    pub fn resolve(&self, candidates: &[&str]) -> Option<ResolvedKey> {
        resolve_key(candidates, |key| self.get(key))
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}
