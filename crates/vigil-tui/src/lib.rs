//! Full-screen TUI for browsing a user's browser sessions.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::{Context, Result};
pub use runtime::TuiRuntime;
use vigil_core::client::SessionsClient;
use vigil_core::config::Config;

/// Runs the interactive session browser for one or more accounts.
pub async fn run_session_browser(config: &Config, users: Vec<String>) -> Result<()> {
    // The browser needs a terminal to render the TUI
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The session browser requires a terminal.\n\
             Use `vigil sessions list --user <ID>` for non-interactive output."
        );
    }
    if users.is_empty() {
        anyhow::bail!(
            "No account to inspect.\n\
             Pass --user <ID> or set `user` in config.toml."
        );
    }

    let server_url = config
        .server_url
        .as_deref()
        .context("No server_url configured. Set it in config.toml or pass --server.")?;
    let client = SessionsClient::new(server_url, config.access_token.clone());

    let mut runtime = TuiRuntime::new(client, users, config.page_size)?;
    runtime.run()
}
