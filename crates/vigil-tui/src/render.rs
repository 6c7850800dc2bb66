//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! Frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::sessions::render_sessions;
use crate::state::AppState;

/// Height of the status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
        .split(area);

    if let Some(list) = app.sessions.active() {
        render_sessions(frame, list, chunks[0], app.spinner_frame);
    }
    render_status_line(app, frame, chunks[1]);
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled(
        " q quit · n/p page · a filter · r refresh · g first",
        dim,
    )];
    if app.sessions.users().len() > 1 {
        spans.push(Span::styled(
            format!(
                " · tab account ({}/{})",
                app.sessions.active_index() + 1,
                app.sessions.users().len()
            ),
            dim,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
