//! Browser-session models as returned by the GraphQL API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::pagination::PageInfo;

/// Lifecycle state of a browser session.
///
/// Mirrors the server-side enum: a session is active until it is finished,
/// and the transition is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Active,
    Finished,
}

impl SessionState {
    pub fn label(self) -> &'static str {
        match self {
            SessionState::Active => "active",
            SessionState::Finished => "finished",
        }
    }
}

/// One browser session node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSession {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub last_active_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_active_ip: Option<String>,
}

impl BrowserSession {
    /// State derived from the finish timestamp, matching the server enum.
    pub fn state(&self) -> SessionState {
        if self.finished_at.is_some() {
            SessionState::Finished
        } else {
            SessionState::Active
        }
    }
}

/// A connection edge: the node plus the cursor addressing it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionEdge {
    pub cursor: String,
    pub node: BrowserSession,
}

/// One loaded page of the browser-sessions connection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsPage {
    pub total_count: u64,
    #[serde(default)]
    pub edges: Vec<SessionEdge>,
    pub page_info: PageInfo,
}

impl SessionsPage {
    pub fn sessions(&self) -> impl Iterator<Item = &BrowserSession> {
        self.edges.iter().map(|edge| &edge.node)
    }
}
