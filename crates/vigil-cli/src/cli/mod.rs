//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use vigil_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(version = "0.1")]
#[command(about = "Terminal client for reviewing browser sessions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// GraphQL server base URL (overrides config)
    #[arg(long, value_name = "URL", env = "VIGIL_SERVER")]
    server: Option<String>,

    /// Account (user id) to inspect; repeat for multiple accounts
    #[arg(long = "user", value_name = "ID")]
    users: Vec<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Inspect browser sessions
    Sessions {
        #[command(subcommand)]
        command: SessionsCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SessionsCommands {
    /// Print one page of a user's sessions
    List {
        /// Account (user id) to inspect (overrides config)
        #[arg(long, value_name = "ID")]
        user: Option<String>,

        /// Include finished sessions, not just active ones
        #[arg(long)]
        all: bool,

        /// Sessions per page (overrides config)
        #[arg(long, value_name = "N")]
        page_size: Option<u32>,

        /// Start after this cursor (from a previous page)
        #[arg(long, value_name = "CURSOR")]
        after: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logging goes to a file under VIGIL_HOME; the TUI owns the screen.
    let _ = vigil_core::logging::init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(server) = cli.server {
        config.server_url = Some(server);
    }
    tracing::debug!(server = ?config.server_url, "config loaded");

    match cli.command {
        None => {
            let users = resolve_users(cli.users, &config);
            vigil_tui::run_session_browser(&config, users).await
        }
        Some(Commands::Sessions { command }) => match command {
            SessionsCommands::List {
                user,
                all,
                page_size,
                after,
            } => {
                let user = user
                    .or_else(|| cli.users.first().cloned())
                    .or_else(|| config.user.clone())
                    .context("No account to inspect. Pass --user <ID> or set `user` in config.toml.")?;
                if let Some(size) = page_size {
                    config.page_size = size;
                }
                commands::sessions::list(&config, &user, all, after).await
            }
        },
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

fn resolve_users(users: Vec<String>, config: &Config) -> Vec<String> {
    if users.is_empty() {
        config.user.clone().into_iter().collect()
    } else {
        users
    }
}
