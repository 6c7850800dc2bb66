//! Browser-sessions list feature: state, intents, and rendering.

mod render;
mod state;
mod update;

pub use render::render_sessions;
pub use state::{QueryResult, SessionListState, SessionLists};
pub use update::{
    NavDirection, first_page, handle_sessions_event, navigate, refresh, toggle_filter,
};
