//! Main chat loop.
//!
//! Reads lines, dispatches slash commands, and sends everything else through
//! the chat service for the current session and persona. Each session keeps
//! its own history in the shared store, so switching back and forth with
//! `/session` or `/persona` resumes where the conversation left off.

use std::time::Instant;

use console::style;
use tracing::debug;

use supergpt_types::chat::{Sender, Turn};
use supergpt_types::error::ChatError;
use supergpt_types::image::ImageReference;
use supergpt_types::persona::Persona;

use crate::cli::spinner;
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ChatRenderer, accent_color};

/// Longest history line shown by `/history` before truncation.
const HISTORY_PREVIEW_CHARS: usize = 100;

fn preview(text: &str) -> String {
    if text.chars().count() > HISTORY_PREVIEW_CHARS {
        let cut: String = text.chars().take(HISTORY_PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

fn print_history(turns: &[Turn], persona: Persona) {
    println!();
    if turns.is_empty() {
        println!("  {}", style("No messages in this session yet.").dim());
    }
    for turn in turns {
        let label = match turn.sender {
            Sender::User => style("You".to_string()).green(),
            Sender::Assistant => style(persona.label().to_string()).cyan(),
        };
        let time = turn.created_at.with_timezone(&chrono::Local).format("%H:%M");
        println!(
            "  {} {} {}",
            style(time).dim(),
            label.bold(),
            preview(&turn.text)
        );
    }
    println!();
}

fn print_image(image: &ImageReference) {
    println!();
    if image.is_placeholder() {
        println!(
            "  {} Image generation is unavailable; showing a placeholder.",
            style("!").yellow().bold()
        );
    }
    println!("  {} {}", style("Image:").bold(), style(&image.url).cyan().underlined());
    if let Some(revised) = &image.revised_prompt {
        println!("  {} {}", style("Revised prompt:").dim(), style(revised).dim());
    }
    println!();
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(
    state: &AppState,
    persona: Persona,
    session: Option<String>,
) -> anyhow::Result<()> {
    let chat = &state.chat_service;
    let model = state.model_label();
    let configured = chat.orchestrator().text_provider().is_some();

    let mut persona = persona;
    let mut session_key = session.unwrap_or_else(|| persona.default_session_key().to_string());

    print_welcome_banner(persona, &session_key, &model, configured);

    let mut renderer = ChatRenderer::new(accent_color(persona));
    let (mut chat_input, _writer) = ChatInput::new(persona, &session_key)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Goodbye.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => chat_input.clear(),
                ChatCommand::Exit => {
                    println!("\n  {}", style("Goodbye.").dim());
                    break;
                }
                ChatCommand::Reset => {
                    chat.reset(&session_key);
                    println!(
                        "\n  {} Cleared session {}.\n",
                        style("*").cyan().bold(),
                        style(&session_key).bold()
                    );
                }
                ChatCommand::History => print_history(&chat.history(&session_key), persona),
                ChatCommand::Sessions => {
                    let store = chat.store();
                    println!();
                    for key in store.keys() {
                        let marker = if key == session_key { "*" } else { " " };
                        println!(
                            "  {} {:<16} {}",
                            style(marker).cyan().bold(),
                            key,
                            style(format!("{} messages", store.len(&key))).dim()
                        );
                    }
                    if store.keys().is_empty() {
                        println!("  {}", style("No sessions yet.").dim());
                    }
                    println!();
                }
                ChatCommand::Persona(next) => {
                    persona = next;
                    session_key = persona.default_session_key().to_string();
                    renderer.set_accent(accent_color(persona));
                    chat_input.switch_to(persona, &session_key);
                    println!(
                        "\n  {} Now talking to {} (session {}).\n",
                        style("*").cyan().bold(),
                        style(persona.label()).bold(),
                        style(&session_key).dim()
                    );
                }
                ChatCommand::Session(key) => {
                    session_key = key;
                    chat_input.switch_to(persona, &session_key);
                    println!(
                        "\n  {} Switched to session {} ({} messages).\n",
                        style("*").cyan().bold(),
                        style(&session_key).bold(),
                        chat.store().len(&session_key)
                    );
                }
                ChatCommand::Image(prompt) => {
                    let spinner = spinner("generating image...");
                    let result = chat.generate_image(&session_key, &prompt).await;
                    spinner.finish_and_clear();
                    match result {
                        Ok(image) => print_image(&image),
                        Err(e) => println!("\n  {} {e}\n", style("!").yellow().bold()),
                    }
                }
                ChatCommand::Unknown(message) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(message).dim()
                    );
                }
            }
            continue;
        }

        let started = Instant::now();
        let spinner = spinner("thinking...");
        let result = chat.send(&session_key, persona, &text).await;
        spinner.finish_and_clear();

        match result {
            Ok(Some(turn)) => {
                println!();
                println!("  {}", renderer.render(&turn.text).trim());
                renderer.print_stats_footer(started.elapsed().as_millis() as u64, &model);
                println!();
            }
            Ok(None) => {
                println!(
                    "\n  {}\n",
                    style("Session was reset before the reply arrived.").dim()
                );
            }
            Err(ChatError::EmptyMessage) => {}
            Err(e @ ChatError::Busy(_)) => {
                debug!(session_key = %session_key, "Send rejected while awaiting a reply");
                println!("\n  {} {e}\n", style("!").yellow().bold());
            }
        }
    }

    Ok(())
}
