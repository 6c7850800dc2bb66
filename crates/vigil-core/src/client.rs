//! GraphQL client for the browser-sessions connection.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use vigil_types::{PageQuery, SessionState, SessionsPage};

/// GraphQL document for one page of a user's browser sessions.
const BROWSER_SESSIONS_QUERY: &str = "\
query BrowserSessionList($userId: ID!, $state: SessionState, $first: Int, $after: String, $last: Int, $before: String) {
  user(id: $userId) {
    id
    browserSessions(first: $first, after: $after, last: $last, before: $before, state: $state) {
      totalCount
      edges {
        cursor
        node {
          id
          createdAt
          finishedAt
          userAgent
          lastActiveAt
          lastActiveIp
        }
      }
      pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
      }
    }
  }
}
";

/// Variables for one browser-sessions request.
///
/// Doubles as the identity of an in-flight fetch: a response is committed
/// only when its variables still match what the list currently wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionsVariables {
    pub user_id: String,
    /// `None` means all sessions; the wire value is an explicit `null`.
    pub state: Option<SessionState>,
    pub page: PageQuery,
}

/// Wire shape of the variables object.
///
/// `state` is always present (explicitly `null` for "all states"), while the
/// pagination arguments for the unused direction are omitted entirely.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireVariables<'a> {
    user_id: &'a str,
    state: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    before: Option<&'a str>,
}

impl SessionsVariables {
    fn to_wire(&self) -> WireVariables<'_> {
        let state = self.state.map(|s| match s {
            SessionState::Active => "ACTIVE",
            SessionState::Finished => "FINISHED",
        });
        let (first, after, last, before) = match &self.page {
            PageQuery::Forward { first, after } => {
                (Some(*first), after.as_deref(), None, None)
            }
            PageQuery::Backward { last, before } => {
                (None, None, Some(*last), Some(before.as_str()))
            }
        };
        WireVariables {
            user_id: &self.user_id,
            state,
            first,
            after,
            last,
            before,
        }
    }
}

#[derive(Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

// The derived impl requires `D: Default` because of the field-level default.
#[derive(serde::Deserialize)]
struct GraphqlResponse<D> {
    #[serde(default)]
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(serde::Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionsData {
    #[serde(default)]
    user: Option<UserNode>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    #[serde(default)]
    browser_sessions: Option<SessionsPage>,
}

/// Client for the sessions GraphQL endpoint.
pub struct SessionsClient {
    endpoint: String,
    access_token: Option<String>,
    http: reqwest::Client,
}

impl SessionsClient {
    /// Creates a client for `server_url`, which may or may not carry a
    /// trailing slash.
    pub fn new(server_url: &str, access_token: Option<String>) -> Self {
        Self {
            endpoint: format!("{}/graphql", server_url.trim_end_matches('/')),
            access_token,
            http: reqwest::Client::new(),
        }
    }

    /// Fetches one page of a user's browser sessions.
    ///
    /// Returns `Ok(None)` when the server reports no such user; transport,
    /// auth, and GraphQL-level errors all surface as `Err`.
    pub async fn browser_sessions(
        &self,
        variables: &SessionsVariables,
    ) -> Result<Option<SessionsPage>> {
        tracing::debug!(user = %variables.user_id, "fetching browser sessions");
        let response: GraphqlResponse<SessionsData> = self
            .execute(GraphqlRequest {
                query: BROWSER_SESSIONS_QUERY,
                variables: variables.to_wire(),
            })
            .await?;
        decode_sessions(response)
    }

    async fn execute<V: Serialize, D: DeserializeOwned + Default>(
        &self,
        request: GraphqlRequest<'_, V>,
    ) -> Result<GraphqlResponse<D>> {
        let mut builder = self.http.post(&self.endpoint).json(&request);
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.endpoint))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            bail!("Not signed in: the server rejected the access token");
        }
        let response = response
            .error_for_status()
            .with_context(|| format!("Request to {} failed", self.endpoint))?;

        response
            .json()
            .await
            .context("Failed to decode GraphQL response")
    }
}

fn decode_sessions(response: GraphqlResponse<SessionsData>) -> Result<Option<SessionsPage>> {
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        bail!("GraphQL error: {}", messages.join("; "));
    }
    let Some(user) = response.data.and_then(|d| d.user) else {
        return Ok(None);
    };
    let page = user
        .browser_sessions
        .context("Response is missing browserSessions")?;
    Ok(Some(page))
}
