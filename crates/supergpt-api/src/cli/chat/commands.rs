//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and switch sessions, personas and surfaces
//! without leaving the loop.

use console::style;

use supergpt_types::persona::Persona;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat loop.
    Exit,
    /// Clear the current session's conversation.
    Reset,
    /// Show the current session's conversation.
    History,
    /// List sessions that have been used.
    Sessions,
    /// Switch persona (and move to its surface's session).
    Persona(Persona),
    /// Switch to another session key, keeping the persona.
    Session(String),
    /// Generate an image from a prompt.
    Image(String),
    /// Unknown command or missing argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/reset" | "/new" => ChatCommand::Reset,
        "/history" => ChatCommand::History,
        "/sessions" => ChatCommand::Sessions,
        "/persona" if arg.is_empty() => {
            ChatCommand::Unknown("/persona requires chat, image, floorplan or render".to_string())
        }
        "/persona" => match arg.parse::<Persona>() {
            Ok(persona) => ChatCommand::Persona(persona),
            Err(e) => ChatCommand::Unknown(e),
        },
        "/session" if arg.is_empty() => {
            ChatCommand::Unknown("/session requires a session key".to_string())
        }
        "/session" => ChatCommand::Session(arg.to_string()),
        "/image" | "/img" if arg.is_empty() => {
            ChatCommand::Unknown("/image requires a prompt".to_string())
        }
        "/image" | "/img" => ChatCommand::Image(arg.to_string()),
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the screen"),
        ("/exit", "Leave the chat"),
        ("/reset", "Clear this session's conversation"),
        ("/history", "Show this session's conversation"),
        ("/sessions", "List sessions in use"),
        ("/persona <name>", "Switch to chat, image, floorplan or render"),
        ("/session <key>", "Switch to another session"),
        ("/image <prompt>", "Generate an interior design image"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (command, description) in rows {
        println!("  {:<18} {}", style(command).cyan(), description);
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
