//! Configuration loader for SuperGPT.
//!
//! Reads `config.toml` from the home directory (`~/.supergpt/` unless
//! `SUPERGPT_HOME` is set) and deserializes it into [`AppConfig`]. Falls back
//! to defaults when the file is missing or malformed, then applies
//! environment overrides.

use std::path::{Path, PathBuf};

use supergpt_types::config::AppConfig;
use supergpt_types::error::ConfigError;

/// Name of the config file inside the home directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the SuperGPT home directory.
///
/// Priority: `SUPERGPT_HOME`, then `~/.supergpt`, then `./.supergpt`.
pub fn resolve_home_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SUPERGPT_HOME") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".supergpt");
    }

    PathBuf::from(".supergpt")
}

/// Parse a config file's contents.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str::<AppConfig>(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Reject values the providers cannot use.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.text.model.trim().is_empty() {
        return Err(ConfigError::Invalid("text.model must not be empty".to_string()));
    }
    if config.image.model.trim().is_empty() {
        return Err(ConfigError::Invalid("image.model must not be empty".to_string()));
    }
    let square = config
        .image
        .size
        .split_once('x')
        .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)))
        .is_some_and(|(w, h)| w == h && w > 0);
    if !square {
        return Err(ConfigError::Invalid(format!(
            "image.size must be a square resolution like 1024x1024, got '{}'",
            config.image.size
        )));
    }
    Ok(())
}

async fn read_config_file(path: &Path) -> Result<Option<String>, ConfigError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ConfigError::Io(err.to_string())),
    }
}

/// Load configuration from `{home_dir}/config.toml`.
///
/// - Missing file: [`AppConfig::default()`].
/// - Unreadable, malformed or invalid file: logs a warning and returns the default.
pub async fn load_config(home_dir: &Path) -> AppConfig {
    let config_path = home_dir.join(CONFIG_FILE);

    let loaded = match read_config_file(&config_path).await {
        Ok(Some(content)) => parse_config(&content).and_then(|config| {
            validate_config(&config)?;
            Ok(config)
        }),
        Ok(None) => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => Err(err),
    };

    match loaded {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err} ({}), using defaults", config_path.display());
            AppConfig::default()
        }
    }
}

/// Apply `SUPERGPT_*` environment overrides on top of a loaded config.
///
/// Recognised variables: `SUPERGPT_TEXT_PROVIDER`, `SUPERGPT_TEXT_MODEL`,
/// `SUPERGPT_TEXT_BASE_URL`, `SUPERGPT_IMAGE_MODEL`, `SUPERGPT_IMAGE_BASE_URL`.
pub fn apply_env_overrides(mut config: AppConfig, lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    if let Some(provider) = lookup("SUPERGPT_TEXT_PROVIDER") {
        config.text.provider = provider;
    }
    if let Some(model) = lookup("SUPERGPT_TEXT_MODEL") {
        config.text.model = model;
    }
    if let Some(base_url) = lookup("SUPERGPT_TEXT_BASE_URL") {
        config.text.base_url = Some(base_url);
    }
    if let Some(model) = lookup("SUPERGPT_IMAGE_MODEL") {
        config.image.model = model;
    }
    if let Some(base_url) = lookup("SUPERGPT_IMAGE_BASE_URL") {
        config.image.base_url = base_url;
    }
    config
}

/// Load the config file and apply process environment overrides.
pub async fn load_effective_config(home_dir: &Path) -> AppConfig {
    let config = load_config(home_dir).await;
    apply_env_overrides(config, |key| std::env::var(key).ok())
}
