//! Cursor-based pagination primitives for GraphQL connections.
//!
//! A [`PageQuery`] pins exactly one page of a connection: forward pages are
//! addressed by `first`/`after`, backward pages by `last`/`before`. The
//! [`navigable`] reducer turns the server's [`PageInfo`] for the current page
//! into the concrete queries for the adjacent pages, or into nothing when an
//! edge of the connection (or a missing cursor) makes a direction unreachable.

use serde::Deserialize;

/// Number of sessions requested per page unless overridden by configuration.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One fully-specified page of a connection.
///
/// The canonical entry point is the first forward page with no cursor; every
/// other reachable page is derived from a server-provided cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageQuery {
    Forward { first: u32, after: Option<String> },
    Backward { last: u32, before: String },
}

impl PageQuery {
    /// The canonical first page at the default size.
    pub fn first_page() -> Self {
        Self::first_page_sized(DEFAULT_PAGE_SIZE)
    }

    /// The canonical first page at an explicit size.
    pub fn first_page_sized(size: u32) -> Self {
        PageQuery::Forward {
            first: size,
            after: None,
        }
    }

    /// The page size this query was issued with, regardless of direction.
    pub fn size(&self) -> u32 {
        match self {
            PageQuery::Forward { first, .. } => *first,
            PageQuery::Backward { last, .. } => *last,
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::first_page()
    }
}

/// Connection page metadata as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// Queries for the pages adjacent to the current one.
///
/// `None` in a direction means that direction is not navigable right now,
/// either because the connection ends there or because no usable state is
/// available yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigable {
    pub previous: Option<PageQuery>,
    pub next: Option<PageQuery>,
}

/// Derive the adjacent-page queries from the current query and the latest
/// page metadata.
///
/// Without page metadata (nothing loaded yet) neither direction is navigable.
/// A direction is offered only when the server both reports more data there
/// *and* supplies the cursor needed to address it; a flag without its cursor
/// is treated as not navigable rather than issuing a query the server cannot
/// anchor.
pub fn navigable(current: &PageQuery, info: Option<&PageInfo>) -> Navigable {
    let Some(info) = info else {
        return Navigable::default();
    };
    let size = current.size();

    let next = match (&info.end_cursor, info.has_next_page) {
        (Some(cursor), true) => Some(PageQuery::Forward {
            first: size,
            after: Some(cursor.clone()),
        }),
        _ => None,
    };
    let previous = match (&info.start_cursor, info.has_previous_page) {
        (Some(cursor), true) => Some(PageQuery::Backward {
            last: size,
            before: cursor.clone(),
        }),
        _ => None,
    };

    Navigable { previous, next }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(
        has_next: bool,
        has_prev: bool,
        start: Option<&str>,
        end: Option<&str>,
    ) -> PageInfo {
        PageInfo {
            has_next_page: has_next,
            has_previous_page: has_prev,
            start_cursor: start.map(str::to_owned),
            end_cursor: end.map(str::to_owned),
        }
    }

    #[test]
    fn nothing_loaded_means_nothing_navigable() {
        let nav = navigable(&PageQuery::first_page(), None);
        assert_eq!(nav, Navigable::default());
    }

    #[test]
    fn first_of_several_pages_offers_only_next() {
        // 45 sessions at a page size of 10: first page has a next page and
        // no previous page.
        let nav = navigable(
            &PageQuery::first_page(),
            Some(&info(true, false, Some("c1"), Some("c10"))),
        );
        assert_eq!(
            nav.next,
            Some(PageQuery::Forward {
                first: 10,
                after: Some("c10".into()),
            })
        );
        assert_eq!(nav.previous, None);
    }

    #[test]
    fn middle_page_offers_both_directions() {
        let current = PageQuery::Forward {
            first: 10,
            after: Some("c10".into()),
        };
        let nav = navigable(&current, Some(&info(true, true, Some("c11"), Some("c20"))));
        assert_eq!(
            nav.previous,
            Some(PageQuery::Backward {
                last: 10,
                before: "c11".into(),
            })
        );
        assert_eq!(
            nav.next,
            Some(PageQuery::Forward {
                first: 10,
                after: Some("c20".into()),
            })
        );
    }

    #[test]
    fn last_page_offers_only_previous() {
        let current = PageQuery::Forward {
            first: 10,
            after: Some("c40".into()),
        };
        let nav = navigable(&current, Some(&info(false, true, Some("c41"), Some("c45"))));
        assert_eq!(nav.next, None);
        assert_eq!(
            nav.previous,
            Some(PageQuery::Backward {
                last: 10,
                before: "c41".into(),
            })
        );
    }

    #[test]
    fn next_flag_without_end_cursor_is_not_navigable() {
        let nav = navigable(
            &PageQuery::first_page(),
            Some(&info(true, false, Some("c1"), None)),
        );
        assert_eq!(nav.next, None);
    }

    #[test]
    fn previous_flag_without_start_cursor_is_not_navigable() {
        let current = PageQuery::Forward {
            first: 10,
            after: Some("c10".into()),
        };
        let nav = navigable(&current, Some(&info(false, true, None, Some("c20"))));
        assert_eq!(nav.previous, None);
    }

    #[test]
    fn derived_queries_keep_the_current_page_size() {
        let current = PageQuery::Backward {
            last: 25,
            before: "c30".into(),
        };
        let nav = navigable(&current, Some(&info(true, true, Some("c5"), Some("c29"))));
        assert_eq!(nav.next.map(|q| q.size()), Some(25));
        assert_eq!(nav.previous.map(|q| q.size()), Some(25));
    }

    #[test]
    fn page_info_deserializes_from_camel_case() {
        let parsed: PageInfo = serde_json::from_str(
            r#"{"hasNextPage":true,"hasPreviousPage":false,"startCursor":"a","endCursor":"b"}"#,
        )
        .unwrap();
        assert_eq!(parsed, info(true, false, Some("a"), Some("b")));
    }

    #[test]
    fn page_info_tolerates_missing_fields() {
        let parsed: PageInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, PageInfo::default());
    }
}
