use thiserror::Error;

/// Errors from the chat service (the caller of the orchestrator).
///
/// The orchestrator itself never fails; these are input and gating errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("session '{0}' is already awaiting a response")]
    Busy(String),
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("invalid config value: {0}")]
    Invalid(String),
}
