//! Intents and fetch-outcome handling for the sessions list.

use crate::common::TaskSeq;
use crate::effects::UiEffect;
use crate::events::SessionsUiEvent;

use super::state::SessionListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

/// Moves one page in `direction` if that direction is currently navigable.
///
/// A non-navigable direction is a no-op: no state change, no fetch.
pub fn navigate(
    list: &mut SessionListState,
    seq: &mut TaskSeq,
    direction: NavDirection,
) -> Vec<UiEffect> {
    let nav = list.navigable();
    let request = match direction {
        NavDirection::Previous => nav.previous,
        NavDirection::Next => nav.next,
    };
    let Some(page) = request else {
        return vec![];
    };
    list.set_page(page);
    begin(list, seq)
}

/// Flips the state filter and refetches from the first page.
pub fn toggle_filter(list: &mut SessionListState, seq: &mut TaskSeq) -> Vec<UiEffect> {
    list.toggle_filter();
    begin(list, seq)
}

/// Refetches whatever the list currently wants.
pub fn refresh(list: &mut SessionListState, seq: &mut TaskSeq) -> Vec<UiEffect> {
    begin(list, seq)
}

/// Jumps back to the first page and refetches.
pub fn first_page(list: &mut SessionListState, seq: &mut TaskSeq) -> Vec<UiEffect> {
    list.reset_to_first_page();
    begin(list, seq)
}

fn begin(list: &mut SessionListState, seq: &mut TaskSeq) -> Vec<UiEffect> {
    list.begin_fetch();
    vec![UiEffect::FetchSessions {
        task: seq.next_id(),
        variables: list.variables(),
    }]
}

/// Applies a fetch outcome to the list it was issued for.
///
/// Outcomes whose variables no longer match what the list wants are dropped;
/// the user has since asked for a different page or filter and a newer fetch
/// is on its way.
pub fn handle_sessions_event(list: &mut SessionListState, event: SessionsUiEvent) {
    if *event.variables() != list.variables() {
        tracing::debug!(user = %list.user_id, "dropping superseded fetch outcome");
        return;
    }
    match event {
        SessionsUiEvent::PageLoaded { page, .. } => list.commit_loaded(page),
        SessionsUiEvent::UserMissing { .. } => list.commit_user_missing(),
        SessionsUiEvent::FetchFailed { error, .. } => list.commit_failed(error),
        SessionsUiEvent::FetchCancelled { .. } => list.cancel_fetch(),
    }
}
