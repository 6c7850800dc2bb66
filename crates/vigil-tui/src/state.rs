//! Application state for the TUI.
//!
//! All fields are mutated exclusively by the reducer in `update.rs`; the
//! runtime and render paths only read them.

use crate::common::{TaskSeq, Tasks};
use crate::features::sessions::SessionLists;

pub struct AppState {
    pub should_quit: bool,
    /// Advances on every Tick; drives the pending spinner.
    pub spinner_frame: usize,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub sessions: SessionLists,
}

impl AppState {
    pub fn new(users: Vec<String>, page_size: u32) -> Self {
        Self {
            should_quit: false,
            spinner_frame: 0,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            sessions: SessionLists::new(users, page_size),
        }
    }
}
