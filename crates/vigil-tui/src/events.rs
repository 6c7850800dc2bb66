//! UI event types.
//!
//! Events flow in one direction: terminal input and async task results are
//! turned into `UiEvent`s, and the reducer is the only consumer.

use crossterm::event::Event;
use vigil_core::client::SessionsVariables;
use vigil_types::SessionsPage;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick for animations and render batching.
    Tick,
    /// Raw terminal input.
    Terminal(Event),
    /// An async task was spawned and registered.
    TaskStarted { kind: TaskKind, started: TaskStarted },
    /// An async task finished; the inner event is re-dispatched only when
    /// the task is still the active one for its kind.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },
    /// Browser-sessions fetch outcomes.
    Sessions(SessionsUiEvent),
}

/// Outcomes of a browser-sessions fetch.
///
/// Every variant echoes the request variables so the reducer can route the
/// outcome to the right list and drop responses the list no longer wants.
#[derive(Debug)]
pub enum SessionsUiEvent {
    PageLoaded {
        variables: SessionsVariables,
        page: SessionsPage,
    },
    UserMissing {
        variables: SessionsVariables,
    },
    FetchFailed {
        variables: SessionsVariables,
        error: String,
    },
    FetchCancelled {
        variables: SessionsVariables,
    },
}

impl SessionsUiEvent {
    pub fn variables(&self) -> &SessionsVariables {
        match self {
            SessionsUiEvent::PageLoaded { variables, .. }
            | SessionsUiEvent::UserMissing { variables }
            | SessionsUiEvent::FetchFailed { variables, .. }
            | SessionsUiEvent::FetchCancelled { variables } => variables,
        }
    }
}
