//! Sessions command handlers.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table, presets};
use vigil_core::client::{SessionsClient, SessionsVariables};
use vigil_core::config::Config;
use vigil_types::{PageQuery, SessionState, SessionsPage};

/// Prints one page of `user`'s sessions as a table.
pub async fn list(config: &Config, user: &str, all: bool, after: Option<String>) -> Result<()> {
    let server_url = config
        .server_url
        .as_deref()
        .context("No server_url configured. Set it in config.toml or pass --server.")?;
    let client = SessionsClient::new(server_url, config.access_token.clone());

    let variables = SessionsVariables {
        user_id: user.to_owned(),
        state: if all { None } else { Some(SessionState::Active) },
        page: PageQuery::Forward {
            first: config.page_size,
            after,
        },
    };

    let page = client
        .browser_sessions(&variables)
        .await
        .with_context(|| format!("list sessions for '{user}'"))?;

    match page {
        Some(page) => print_page(&page),
        None => println!("Failed to load browser sessions."),
    }
    Ok(())
}

fn print_page(page: &SessionsPage) {
    if page.edges.is_empty() {
        println!("No sessions found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["ID", "STATE", "CREATED", "LAST ACTIVE", "IP", "USER AGENT"]);
    for session in page.sessions() {
        table.add_row([
            session.id.clone(),
            session.state().label().to_owned(),
            session.created_at.format("%Y-%m-%d %H:%M").to_string(),
            session
                .last_active_at
                .map_or_else(|| "-".to_owned(), |at| {
                    at.format("%Y-%m-%d %H:%M").to_string()
                }),
            session.last_active_ip.clone().unwrap_or_else(|| "-".into()),
            session.user_agent.clone().unwrap_or_else(|| "-".into()),
        ]);
    }
    println!("{table}");

    println!("{} of {} sessions", page.edges.len(), page.total_count);
    if page.page_info.has_next_page
        && let Some(cursor) = &page.page_info.end_cursor
    {
        println!("more available: --after {cursor}");
    }
}
