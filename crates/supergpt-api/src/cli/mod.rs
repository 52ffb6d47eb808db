//! CLI command definitions for the `sgpt` binary.
//!
//! Uses clap derive macros for argument parsing. With no subcommand, `sgpt`
//! opens the interactive chat on the main surface.

pub mod ask;
pub mod chat;
pub mod config;
pub mod image;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use supergpt_types::persona::Persona;

/// SuperGPT: the furniture company's AI assistant in your terminal.
#[derive(Parser)]
#[command(name = "sgpt", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print OpenTelemetry spans to stdout (mixed with chat output).
    #[arg(long, global = true, env = "SUPERGPT_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Surface to talk to: chat, image, floorplan or render.
        #[arg(short, long, default_value = "chat")]
        persona: Persona,

        /// Session key (defaults to the persona's surface).
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Send a single message and print the reply.
    Ask {
        /// Message text.
        message: String,

        #[arg(short, long, default_value = "chat")]
        persona: Persona,

        #[arg(short, long)]
        session: Option<String>,
    },

    /// Generate an interior design image.
    Image {
        /// What to draw.
        prompt: String,

        /// Session to record the exchange in (defaults to "library").
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Show the effective configuration and credential status.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Chat {
            persona: Persona::default(),
            session: None,
        }
    }
}

/// Spinner used while waiting on a provider.
pub fn spinner(message: &'static str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    let style = indicatif::ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_otel_help_names_stdout() {
        let command = Cli::command();
        let otel = command
            .get_arguments()
            .find(|arg| arg.get_id() == "otel")
            .unwrap();
        assert!(otel.get_help().unwrap().to_string().contains("stdout"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_chat() {
        let cli = Cli::try_parse_from(["sgpt"]).unwrap();
        assert!(cli.command.is_none());
        match cli.command.unwrap_or_default() {
            Commands::Chat { persona, session } => {
                assert_eq!(persona, Persona::ChatAssistant);
                assert!(session.is_none());
            }
            _ => panic!("expected chat"),
        }
    }

    #[test]
    fn test_parse_chat_with_persona() {
        let cli = Cli::try_parse_from(["sgpt", "chat", "--persona", "floorplan"]).unwrap();
        match cli.command {
            Some(Commands::Chat { persona, .. }) => {
                assert_eq!(persona, Persona::FloorPlanAssistant)
            }
            _ => panic!("expected chat"),
        }
    }

    #[test]
    fn test_parse_invalid_persona_fails() {
        assert!(Cli::try_parse_from(["sgpt", "chat", "--persona", "kitchen"]).is_err());
    }

    #[test]
    fn test_parse_image_with_global_json() {
        let cli = Cli::try_parse_from(["sgpt", "image", "oak table", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::Image { prompt, session }) => {
                assert_eq!(prompt, "oak table");
                assert!(session.is_none());
            }
            _ => panic!("expected image"),
        }
    }
}
