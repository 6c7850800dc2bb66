//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

use tokio_util::sync::CancellationToken;
use vigil_core::client::SessionsVariables;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Spawn an async fetch of one sessions page.
    FetchSessions {
        task: TaskId,
        variables: SessionsVariables,
    },

    /// Cancel a running task via its token.
    ///
    /// The reducer decides when to cancel; the runtime calls `token.cancel()`.
    CancelTask { token: CancellationToken },
}
