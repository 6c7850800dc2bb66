//! Shared data types for vigil: cursor pagination and browser-session models.

pub mod pagination;
pub mod session;

pub use pagination::{DEFAULT_PAGE_SIZE, Navigable, PageInfo, PageQuery, navigable};
pub use session::{BrowserSession, SessionEdge, SessionState, SessionsPage};
