//! `sgpt config`: effective configuration and credential status.
//!
//! Key values are never printed; only the variable a key was found in.

use anyhow::Result;
use console::style;

use supergpt_infra::config::CONFIG_FILE;
use supergpt_infra::secret::{IMAGE_KEY_VAR, TEXT_KEY_VAR};

use crate::state::AppState;

fn key_status(source: Option<&str>) -> String {
    match source {
        Some(var) => format!("{} (from {var})", style("found").green()),
        None => format!("{}", style("missing").red()),
    }
}

/// Print the effective configuration.
pub fn show_config(state: &AppState, json: bool) -> Result<()> {
    let config_path = state.home_dir.join(CONFIG_FILE);
    let orchestrator = state.chat_service.orchestrator();

    if json {
        let out = serde_json::json!({
            "config_file": config_path.display().to_string(),
            "config_file_exists": config_path.exists(),
            "config": state.config,
            "credentials": {
                "text": state.text_key_source,
                "image": state.image_key_source,
            },
            "text_provider_ready": orchestrator.text_provider().is_some(),
            "image_provider_ready": orchestrator.image_provider().is_some(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {} SuperGPT v{}", style("*").cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!();
    println!(
        "  {}  {}{}",
        style("Config file:").bold(),
        config_path.display(),
        if config_path.exists() { "" } else { " (not present, using defaults)" }
    );
    println!(
        "  {}    {} / {}",
        style("Text model:").bold(),
        state.config.text.provider,
        state.config.text.model
    );
    println!("  {}     {}", style("Text key:").bold(), key_status(state.text_key_source.as_deref()));
    println!("  {}   {}", style("Image model:").bold(), state.config.image.model);
    println!("  {}    {}", style("Image key:").bold(), key_status(state.image_key_source.as_deref()));
    println!(
        "  {}      {} prior turns",
        style("History:").bold(),
        state.config.effective_history_window()
    );

    if state.text_key_source.is_none() || state.image_key_source.is_none() {
        println!();
        println!("  {}", style("To enable AI replies and images:").bold());
        if state.text_key_source.is_none() {
            println!(
                "    export {TEXT_KEY_VAR}=...   {}",
                style("# Gemini: https://aistudio.google.com/app/apikey").dim()
            );
        }
        if state.image_key_source.is_none() {
            println!(
                "    export {IMAGE_KEY_VAR}=...   {}",
                style("# OpenAI: https://platform.openai.com/api-keys").dim()
            );
        }
    }

    println!();
    println!("  {}", style("Current settings as TOML:").dim());
    for line in toml::to_string_pretty(&state.config)?.lines() {
        println!("    {}", style(line).dim());
    }
    println!();
    Ok(())
}
