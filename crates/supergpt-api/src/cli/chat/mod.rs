//! Interactive terminal chat for SuperGPT.
//!
//! Implements the conversation loop over the session store: markdown
//! rendering of replies, a thinking spinner, the welcome banner and slash
//! commands for switching surfaces. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
