//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::sessions::{self, NavDirection};
use crate::state::AppState;

/// Effects to run before the first frame: fetch the active account's list.
pub fn initial_effects(app: &mut AppState) -> Vec<UiEffect> {
    sessions::refresh(app.sessions.active_mut(), &mut app.task_seq)
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = {
                let state = app.tasks.state_mut(kind);
                state.finish_if_active(completed.id)
            };
            if ok {
                update(app, *completed.result)
            } else {
                vec![]
            }
        }
        UiEvent::Sessions(sessions_event) => {
            let user_id = sessions_event.variables().user_id.clone();
            if let Some(list) = app.sessions.get_mut(&user_id) {
                sessions::handle_sessions_event(list, sessions_event);
            }
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],

        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
            sessions::navigate(app.sessions.active_mut(), &mut app.task_seq, NavDirection::Next)
        }
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => sessions::navigate(
            app.sessions.active_mut(),
            &mut app.task_seq,
            NavDirection::Previous,
        ),
        KeyCode::Char('a') => {
            sessions::toggle_filter(app.sessions.active_mut(), &mut app.task_seq)
        }
        KeyCode::Char('r') => sessions::refresh(app.sessions.active_mut(), &mut app.task_seq),
        KeyCode::Char('g') => sessions::first_page(app.sessions.active_mut(), &mut app.task_seq),

        KeyCode::Char('j') | KeyCode::Down => {
            app.sessions.active_mut().move_selection(1);
            vec![]
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.sessions.active_mut().move_selection(-1);
            vec![]
        }

        KeyCode::Tab => cycle_account(app),
        _ => vec![],
    }
}

/// Moves to the next account, cancelling the old account's in-flight fetch
/// and refreshing the new one.
fn cycle_account(app: &mut AppState) -> Vec<UiEffect> {
    if app.sessions.users().len() < 2 {
        return vec![];
    }
    let mut effects = Vec::new();
    if let Some(token) = app.tasks.sessions_fetch.cancel.clone() {
        effects.push(UiEffect::CancelTask { token });
    }
    app.sessions.active_mut().cancel_fetch();
    let list = app.sessions.cycle();
    effects.extend(sessions::refresh(list, &mut app.task_seq));
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
    use crate::events::SessionsUiEvent;
    use vigil_core::client::SessionsVariables;
    use vigil_types::{PageInfo, PageQuery, SessionEdge, SessionsPage};

    fn app() -> AppState {
        AppState::new(vec!["user:01A".into()], 10)
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn page(total: u64, cursors: std::ops::RangeInclusive<u32>, has_next: bool, has_prev: bool) -> SessionsPage {
        let edges: Vec<SessionEdge> = cursors
            .map(|i| SessionEdge {
                cursor: format!("c{i}"),
                node: vigil_types::BrowserSession {
                    id: format!("session-{i}"),
                    created_at: chrono::Utc::now(),
                    finished_at: None,
                    user_agent: Some("Mozilla/5.0".into()),
                    last_active_at: None,
                    last_active_ip: None,
                },
            })
            .collect();
        SessionsPage {
            total_count: total,
            page_info: PageInfo {
                has_next_page: has_next,
                has_previous_page: has_prev,
                start_cursor: edges.first().map(|e| e.cursor.clone()),
                end_cursor: edges.last().map(|e| e.cursor.clone()),
            },
            edges,
        }
    }

    /// Pulls the spawned fetch out of the effects and plays back its
    /// TaskStarted, as the runtime would.
    fn start_fetch(app: &mut AppState, effects: &[UiEffect]) -> (TaskId, SessionsVariables) {
        let Some(UiEffect::FetchSessions { task, variables }) = effects
            .iter()
            .find(|e| matches!(e, UiEffect::FetchSessions { .. }))
        else {
            panic!("expected a fetch effect");
        };
        let started = TaskStarted {
            id: *task,
            cancel: None,
        };
        update(
            app,
            UiEvent::TaskStarted {
                kind: TaskKind::SessionsFetch,
                started,
            },
        );
        (*task, variables.clone())
    }

    fn complete(app: &mut AppState, id: TaskId, inner: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind: TaskKind::SessionsFetch,
                completed: TaskCompleted {
                    id,
                    result: Box::new(inner),
                },
            },
        )
    }

    fn load_first_page(app: &mut AppState) {
        let effects = initial_effects(app);
        let (id, variables) = start_fetch(app, &effects);
        complete(
            app,
            id,
            UiEvent::Sessions(SessionsUiEvent::PageLoaded {
                variables,
                page: page(45, 1..=10, true, false),
            }),
        );
    }

    #[test]
    fn first_page_of_45_shows_ten_and_only_next() {
        let mut app = app();
        load_first_page(&mut app);

        let list = app.sessions.active().unwrap();
        assert_eq!(list.visible_page().unwrap().edges.len(), 10);
        assert_eq!(list.visible_page().unwrap().total_count, 45);
        let nav = list.navigable();
        assert!(nav.previous.is_none());
        assert_eq!(
            nav.next,
            Some(PageQuery::Forward {
                first: 10,
                after: Some("c10".into()),
            })
        );
    }

    #[test]
    fn quit_keys_emit_quit() {
        let mut app = app();
        assert!(matches!(
            update(&mut app, key(KeyCode::Char('q'))).as_slice(),
            [UiEffect::Quit]
        ));
    }

    #[test]
    fn navigate_without_a_loaded_page_is_a_no_op() {
        let mut app = app();
        let effects = update(&mut app, key(KeyCode::Char('n')));
        assert!(effects.is_empty());
    }

    #[test]
    fn only_the_latest_of_two_racing_fetches_commits() {
        let mut app = app();
        load_first_page(&mut app);

        // Settle on the middle page so both directions are open.
        let effects = update(&mut app, key(KeyCode::Char('n')));
        let (id, variables) = start_fetch(&mut app, &effects);
        complete(
            &mut app,
            id,
            UiEvent::Sessions(SessionsUiEvent::PageLoaded {
                variables,
                page: page(45, 11..=20, true, true),
            }),
        );

        // Go forward, then immediately back.
        let next_effects = update(&mut app, key(KeyCode::Char('n')));
        let (first_id, first_vars) = start_fetch(&mut app, &next_effects);

        let prev_effects = update(&mut app, key(KeyCode::Char('p')));
        let (second_id, second_vars) = start_fetch(&mut app, &prev_effects);
        assert_ne!(first_id, second_id);

        // The older response arrives late and is dropped at the task level.
        complete(
            &mut app,
            first_id,
            UiEvent::Sessions(SessionsUiEvent::PageLoaded {
                variables: first_vars,
                page: page(45, 21..=30, true, true),
            }),
        );
        assert!(app.sessions.active().unwrap().pending);

        // The newer response commits.
        complete(
            &mut app,
            second_id,
            UiEvent::Sessions(SessionsUiEvent::PageLoaded {
                variables: second_vars,
                page: page(45, 1..=10, true, false),
            }),
        );
        let list = app.sessions.active().unwrap();
        assert!(!list.pending);
        assert_eq!(
            list.visible_page().unwrap().edges[0].cursor,
            "c1",
            "the second request's page should be the visible one"
        );
    }

    #[test]
    fn stale_page_remains_visible_while_next_loads() {
        let mut app = app();
        load_first_page(&mut app);

        let effects = update(&mut app, key(KeyCode::Char('n')));
        start_fetch(&mut app, &effects);

        let list = app.sessions.active().unwrap();
        assert!(list.pending);
        assert_eq!(list.visible_page().unwrap().edges[0].cursor, "c1");
    }

    #[test]
    fn filter_toggle_resets_to_first_page_with_no_state() {
        let mut app = app();
        load_first_page(&mut app);

        // Move off the first page, then toggle.
        let effects = update(&mut app, key(KeyCode::Char('n')));
        start_fetch(&mut app, &effects);
        let effects = update(&mut app, key(KeyCode::Char('a')));
        let (_, variables) = start_fetch(&mut app, &effects);

        assert_eq!(variables.state, None);
        assert_eq!(
            variables.page,
            PageQuery::Forward {
                first: 10,
                after: None,
            }
        );
    }

    #[test]
    fn user_missing_response_marks_the_list_failed() {
        let mut app = app();
        let effects = initial_effects(&mut app);
        let (id, variables) = start_fetch(&mut app, &effects);
        complete(
            &mut app,
            id,
            UiEvent::Sessions(SessionsUiEvent::UserMissing { variables }),
        );

        let list = app.sessions.active().unwrap();
        assert!(list.visible_page().is_none());
        assert!(matches!(
            list.result,
            crate::features::sessions::QueryResult::UserMissing
        ));
    }
}
