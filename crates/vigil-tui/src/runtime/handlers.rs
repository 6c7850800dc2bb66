//! Effect handler implementations.
//!
//! Handlers are pure async functions that return a `UiEvent`; the runtime
//! owns spawning and delivery.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vigil_core::client::{SessionsClient, SessionsVariables};

use crate::events::{SessionsUiEvent, UiEvent};

/// Fetches one sessions page, honoring cancellation.
pub async fn fetch_sessions(
    client: Arc<SessionsClient>,
    variables: SessionsVariables,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let request = client.browser_sessions(&variables);
    let outcome = match cancel {
        Some(token) => {
            tokio::select! {
                () = token.cancelled() => {
                    return UiEvent::Sessions(SessionsUiEvent::FetchCancelled { variables });
                }
                outcome = request => outcome,
            }
        }
        None => request.await,
    };

    match outcome {
        Ok(Some(page)) => UiEvent::Sessions(SessionsUiEvent::PageLoaded { variables, page }),
        Ok(None) => UiEvent::Sessions(SessionsUiEvent::UserMissing { variables }),
        Err(error) => {
            tracing::warn!(user = %variables.user_id, "sessions fetch failed: {error:#}");
            UiEvent::Sessions(SessionsUiEvent::FetchFailed {
                variables,
                error: format!("{error:#}"),
            })
        }
    }
}
