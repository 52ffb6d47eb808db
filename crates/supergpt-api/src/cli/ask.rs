//! One-shot `sgpt ask` command.

use anyhow::Result;
use console::style;

use supergpt_types::persona::Persona;

use crate::cli::chat::renderer::{ChatRenderer, accent_color};
use crate::cli::spinner;
use crate::state::AppState;

/// Send one message and print the reply.
///
/// The session starts empty because the store lives only as long as the
/// process; `--session` still selects which key the exchange is recorded
/// under.
pub async fn ask(
    state: &AppState,
    message: &str,
    persona: Persona,
    session: Option<String>,
    json: bool,
) -> Result<()> {
    let session_key = session.unwrap_or_else(|| persona.default_session_key().to_string());

    let spinner = (!json).then(|| spinner("thinking..."));
    let result = state.chat_service.send(&session_key, persona, message).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let Some(turn) = result? else {
        anyhow::bail!("session '{session_key}' was reset before the reply arrived");
    };

    if json {
        let out = serde_json::json!({
            "session": session_key,
            "persona": persona,
            "reply": turn,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let renderer = ChatRenderer::new(accent_color(persona));
    println!();
    println!("  {}", style(persona.label()).cyan().bold());
    println!("  {}", renderer.render(&turn.text).trim());
    println!();
    Ok(())
}
