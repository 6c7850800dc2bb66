//! State for the browser-sessions list.

use std::collections::HashMap;

use vigil_core::client::SessionsVariables;
use vigil_types::{Navigable, PageInfo, PageQuery, SessionState, SessionsPage, navigable};

/// Outcome of the most recent committed fetch for a list.
#[derive(Debug, Clone, Default)]
pub enum QueryResult {
    /// Nothing committed yet (or a fetch is replacing the previous result).
    #[default]
    Pending,
    Loaded(SessionsPage),
    /// The server reported no such user. Terminal for the list.
    UserMissing,
    Failed(String),
}

/// A previously loaded page kept around while its replacement loads, tagged
/// with the filter it was fetched under. Cursors minted under one filter are
/// meaningless under another, so a stale page only feeds navigation while the
/// filter still matches.
#[derive(Debug)]
struct StalePage {
    page: SessionsPage,
    filter: Option<SessionState>,
}

/// One account's paginated session list.
///
/// `page` is what the list currently wants; `result` is what was last
/// committed for it. While a fetch is in flight the previously loaded page is
/// stashed in `last_page` so the view keeps showing stale-but-real content.
#[derive(Debug)]
pub struct SessionListState {
    pub user_id: String,
    /// Active-only by default; `None` shows all sessions.
    pub filter: Option<SessionState>,
    pub page: PageQuery,
    pub result: QueryResult,
    pub pending: bool,
    last_page: Option<StalePage>,
    pub selected: usize,
    page_size: u32,
}

impl SessionListState {
    pub fn new(user_id: String, page_size: u32) -> Self {
        Self {
            user_id,
            filter: Some(SessionState::Active),
            page: PageQuery::first_page_sized(page_size),
            result: QueryResult::Pending,
            pending: false,
            last_page: None,
            selected: 0,
            page_size,
        }
    }

    /// The request this list currently wants. Also the commit guard: a fetch
    /// outcome is applied only while its variables still equal this.
    pub fn variables(&self) -> SessionsVariables {
        SessionsVariables {
            user_id: self.user_id.clone(),
            state: self.filter,
            page: self.page.clone(),
        }
    }

    /// Page metadata of the latest successful load, surviving an in-flight
    /// refetch. A stale page fetched under a different filter is excluded:
    /// its cursors are not valid for the current query.
    pub fn latest_page_info(&self) -> Option<&PageInfo> {
        match &self.result {
            QueryResult::Loaded(page) => Some(&page.page_info),
            QueryResult::Pending => self
                .last_page
                .as_ref()
                .filter(|stale| stale.filter == self.filter)
                .map(|stale| &stale.page.page_info),
            QueryResult::UserMissing | QueryResult::Failed(_) => None,
        }
    }

    pub fn navigable(&self) -> Navigable {
        navigable(&self.page, self.latest_page_info())
    }

    /// The page the view should show right now: the committed one, or the
    /// stale one while its replacement loads.
    pub fn visible_page(&self) -> Option<&SessionsPage> {
        match &self.result {
            QueryResult::Loaded(page) => Some(page),
            QueryResult::Pending => self.last_page.as_ref().map(|stale| &stale.page),
            QueryResult::UserMissing | QueryResult::Failed(_) => None,
        }
    }

    /// Marks a fetch as in flight, keeping the old page visible as stale.
    pub fn begin_fetch(&mut self) {
        self.stash_loaded();
        self.pending = true;
    }

    fn stash_loaded(&mut self) {
        if let QueryResult::Loaded(page) =
            std::mem::replace(&mut self.result, QueryResult::Pending)
        {
            self.last_page = Some(StalePage {
                page,
                filter: self.filter,
            });
        }
    }

    pub fn commit_loaded(&mut self, page: SessionsPage) {
        self.selected = self.selected.min(page.edges.len().saturating_sub(1));
        self.result = QueryResult::Loaded(page);
        self.last_page = None;
        self.pending = false;
    }

    pub fn commit_user_missing(&mut self) {
        self.result = QueryResult::UserMissing;
        self.last_page = None;
        self.pending = false;
    }

    pub fn commit_failed(&mut self, error: String) {
        self.result = QueryResult::Failed(error);
        self.pending = false;
    }

    /// Abandons an in-flight fetch, restoring the stashed page if it still
    /// matches the current filter.
    pub fn cancel_fetch(&mut self) {
        if !self.pending {
            return;
        }
        self.pending = false;
        let filter = self.filter;
        if matches!(self.result, QueryResult::Pending)
            && let Some(stale) = self.last_page.take_if(|s| s.filter == filter)
        {
            self.result = QueryResult::Loaded(stale.page);
        }
    }

    /// Flips between active-only and all sessions, resetting to the first
    /// page in the same step. The current page is stashed before the flip so
    /// it stays visible, but its cursors no longer drive navigation.
    pub fn toggle_filter(&mut self) {
        self.stash_loaded();
        self.filter = if self.filter.is_some() {
            None
        } else {
            Some(SessionState::Active)
        };
        self.reset_to_first_page();
    }

    pub fn reset_to_first_page(&mut self) {
        self.page = PageQuery::first_page_sized(self.page_size);
        self.selected = 0;
    }

    pub fn set_page(&mut self, page: PageQuery) {
        self.page = page;
        self.selected = 0;
    }

    pub fn move_selection(&mut self, delta: i64) {
        let len = self.visible_page().map_or(0, |p| p.edges.len());
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected as i64;
        self.selected = current.saturating_add(delta).clamp(0, len as i64 - 1) as usize;
    }
}

/// Per-account family of session lists.
///
/// Each account keeps its own filter, page, and result; switching accounts
/// never resets another account's list.
#[derive(Debug)]
pub struct SessionLists {
    users: Vec<String>,
    active: usize,
    page_size: u32,
    lists: HashMap<String, SessionListState>,
}

impl SessionLists {
    pub fn new(users: Vec<String>, page_size: u32) -> Self {
        Self {
            users,
            active: 0,
            page_size,
            lists: HashMap::new(),
        }
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn active_user(&self) -> &str {
        &self.users[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active account's list, created on first access.
    pub fn active_mut(&mut self) -> &mut SessionListState {
        let user = self.users[self.active].clone();
        let page_size = self.page_size;
        self.lists
            .entry(user.clone())
            .or_insert_with(|| SessionListState::new(user, page_size))
    }

    pub fn active(&self) -> Option<&SessionListState> {
        self.lists.get(&self.users[self.active])
    }

    pub fn get_mut(&mut self, user_id: &str) -> Option<&mut SessionListState> {
        self.lists.get_mut(user_id)
    }

    /// Moves to the next account, returning its list.
    pub fn cycle(&mut self) -> &mut SessionListState {
        self.active = (self.active + 1) % self.users.len();
        self.active_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_types::SessionEdge;

    fn page(total: u64, cursors: &[&str], has_next: bool, has_prev: bool) -> SessionsPage {
        let edges = cursors
            .iter()
            .map(|cursor| SessionEdge {
                cursor: (*cursor).to_owned(),
                node: vigil_types::BrowserSession {
                    id: format!("session-{cursor}"),
                    created_at: chrono::Utc::now(),
                    finished_at: None,
                    user_agent: None,
                    last_active_at: None,
                    last_active_ip: None,
                },
            })
            .collect::<Vec<_>>();
        SessionsPage {
            total_count: total,
            page_info: PageInfo {
                has_next_page: has_next,
                has_previous_page: has_prev,
                start_cursor: cursors.first().map(|c| (*c).to_owned()),
                end_cursor: cursors.last().map(|c| (*c).to_owned()),
            },
            edges,
        }
    }

    #[test]
    fn stale_page_stays_visible_while_refetching() {
        let mut list = SessionListState::new("user:01A".into(), 10);
        list.begin_fetch();
        list.commit_loaded(page(45, &["c1", "c2"], true, false));

        list.begin_fetch();
        assert!(list.pending);
        let visible = list.visible_page().unwrap();
        assert_eq!(visible.total_count, 45);
    }

    #[test]
    fn navigable_uses_latest_successful_info_during_refetch() {
        let mut list = SessionListState::new("user:01A".into(), 10);
        list.begin_fetch();
        list.commit_loaded(page(45, &["c1", "c2"], true, false));
        list.begin_fetch();

        let nav = list.navigable();
        assert!(nav.next.is_some());
        assert!(nav.previous.is_none());
    }

    #[test]
    fn filter_change_keeps_the_stale_page_visible_but_not_navigable() {
        let mut list = SessionListState::new("user:01A".into(), 10);
        list.begin_fetch();
        list.commit_loaded(page(45, &["c11", "c12"], true, true));

        list.toggle_filter();
        list.begin_fetch();

        // The old rows stay on screen, but their cursors belong to the
        // previous filter and must not seed a navigation request.
        assert!(list.visible_page().is_some());
        assert_eq!(list.navigable(), Navigable::default());
    }

    #[test]
    fn first_load_has_nothing_visible_and_nothing_navigable() {
        let mut list = SessionListState::new("user:01A".into(), 10);
        list.begin_fetch();
        assert!(list.visible_page().is_none());
        assert_eq!(list.navigable(), Navigable::default());
    }

    #[test]
    fn cancel_restores_the_stashed_page() {
        let mut list = SessionListState::new("user:01A".into(), 10);
        list.begin_fetch();
        list.commit_loaded(page(45, &["c1"], true, false));
        list.begin_fetch();
        list.cancel_fetch();

        assert!(!list.pending);
        assert!(matches!(list.result, QueryResult::Loaded(_)));
    }

    #[test]
    fn selection_clamps_to_committed_page() {
        let mut list = SessionListState::new("user:01A".into(), 10);
        list.begin_fetch();
        list.commit_loaded(page(45, &["c1", "c2", "c3"], true, false));
        list.move_selection(10);
        assert_eq!(list.selected, 2);

        list.begin_fetch();
        list.commit_loaded(page(45, &["c4"], false, true));
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn each_account_keeps_its_own_list() {
        let mut lists = SessionLists::new(vec!["a".into(), "b".into()], 10);
        lists.active_mut().toggle_filter();
        assert!(lists.active().unwrap().filter.is_none());

        let second = lists.cycle();
        assert_eq!(second.user_id, "b");
        assert_eq!(second.filter, Some(SessionState::Active));

        let back = lists.cycle();
        assert_eq!(back.user_id, "a");
        assert!(back.filter.is_none());
    }
}
