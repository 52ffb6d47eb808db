//! SuperGPT terminal entry point.
//!
//! Binary name: `sgpt`
//!
//! Parses CLI arguments, sets up tracing, wires the session store and
//! providers, then dispatches to the chat loop or a one-shot command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use supergpt_observe::tracing_setup::{
    TracingOptions, init_tracing, shutdown_tracing, verbosity_filter,
};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut options = TracingOptions::new(verbosity_filter(cli.verbose, cli.quiet));
    options.json = cli.log_json;
    options.otel = cli.otel;
    if let Err(e) = init_tracing(&options) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let command = cli.command.unwrap_or_default();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(shell, &mut cmd, "sgpt", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    let result = match command {
        Commands::Chat { persona, session } => {
            cli::chat::loop_runner::run_chat_loop(&state, persona, session).await
        }
        Commands::Ask {
            message,
            persona,
            session,
        } => cli::ask::ask(&state, &message, persona, session, cli.json).await,
        Commands::Image { prompt, session } => {
            cli::image::generate(&state, &prompt, session, cli.json).await
        }
        Commands::Config => cli::config::show_config(&state, cli.json),
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
