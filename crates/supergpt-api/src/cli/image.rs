//! One-shot `sgpt image` command.

use anyhow::Result;
use console::style;

use crate::cli::spinner;
use crate::state::AppState;

/// Session used for images when none is given (the image library surface).
const DEFAULT_IMAGE_SESSION: &str = "library";

/// Generate an image and print its URL.
///
/// Provider failures still produce a (placeholder) URL; only blank prompts
/// are rejected.
pub async fn generate(
    state: &AppState,
    prompt: &str,
    session: Option<String>,
    json: bool,
) -> Result<()> {
    let session_key = session.unwrap_or_else(|| DEFAULT_IMAGE_SESSION.to_string());

    let spinner = (!json).then(|| spinner("generating image..."));
    let result = state.chat_service.generate_image(&session_key, prompt).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let image = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&image)?);
        return Ok(());
    }

    println!();
    if image.is_placeholder() {
        println!(
            "  {} Image generation is unavailable; showing a placeholder.",
            style("!").yellow().bold()
        );
    }
    println!("  {}  {}", style("URL:").bold(), style(&image.url).cyan().underlined());
    println!("  {} {}", style("Prompt:").bold(), style(&image.submitted_prompt).dim());
    if let Some(revised) = &image.revised_prompt {
        println!("  {} {}", style("Revised:").bold(), style(revised).dim());
    }
    println!();
    Ok(())
}
