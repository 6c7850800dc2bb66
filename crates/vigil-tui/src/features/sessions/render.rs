//! Rendering for the browser-sessions list.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use vigil_types::{BrowserSession, SessionState};

use crate::common::text::truncate_with_ellipsis;

use super::state::{QueryResult, SessionListState};

/// Spinner frames for the pending indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders one account's session list into `area`.
pub fn render_sessions(
    frame: &mut Frame,
    list: &SessionListState,
    area: Rect,
    spinner_frame: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title_line(list, spinner_frame));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    if let Some(page) = list.visible_page() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        render_rows(frame, list, chunks[0]);
        frame.render_widget(
            Paragraph::new(footer_line(list, page.total_count)),
            chunks[1],
        );
        return;
    }

    let message = match &list.result {
        QueryResult::Pending => Paragraph::new(Line::from(vec![
            Span::styled(
                SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()],
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" Loading sessions…"),
        ])),
        QueryResult::UserMissing => Paragraph::new("Failed to load browser sessions.")
            .style(Style::default().fg(Color::DarkGray)),
        QueryResult::Failed(error) => Paragraph::new(vec![
            Line::from(Span::styled(
                "Could not load sessions",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(error.as_str()),
            Line::from(Span::styled(
                "r to retry",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        // visible_page() covered Loaded above
        QueryResult::Loaded(_) => return,
    };
    frame.render_widget(message, inner);
}

fn title_line(list: &SessionListState, spinner_frame: usize) -> Line<'static> {
    let filter = match list.filter {
        Some(SessionState::Active) => "active",
        Some(SessionState::Finished) => "finished",
        None => "all",
    };
    let mut spans = vec![
        Span::raw(" Browser sessions · "),
        Span::styled(list.user_id.clone(), Style::default().fg(Color::Cyan)),
        Span::raw(format!(" · {filter} ")),
    ];
    if list.pending {
        spans.push(Span::styled(
            format!("{} ", SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()]),
            Style::default().fg(Color::Cyan),
        ));
    }
    Line::from(spans)
}

fn render_rows(frame: &mut Frame, list: &SessionListState, area: Rect) {
    let Some(page) = list.visible_page() else {
        return;
    };

    // Stale content is dimmed while its replacement loads.
    let base = if list.pending {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let mut lines = Vec::new();
    for (index, session) in page.sessions().enumerate() {
        if index as u16 >= area.height {
            break;
        }
        let selected = index == list.selected && !list.pending;
        lines.push(session_line(session, selected, base, area.width as usize));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No sessions.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn session_line(
    session: &BrowserSession,
    selected: bool,
    base: Style,
    width: usize,
) -> Line<'static> {
    let (glyph, glyph_style) = match session.state() {
        SessionState::Active => ("●", base.patch(Style::default().fg(Color::Green))),
        SessionState::Finished => ("○", base.patch(Style::default().fg(Color::DarkGray))),
    };
    let marker = if selected { "› " } else { "  " };

    let agent = session.user_agent.as_deref().unwrap_or("unknown agent");
    let ip = session.last_active_ip.as_deref().unwrap_or("-");
    let seen = session
        .last_active_at
        .map_or_else(|| "never".to_owned(), format_timestamp);

    // Fixed-width columns on the right, agent takes the rest.
    let fixed = 2 + 2 + 18 + 2 + ip.len() + 2 + seen.len();
    let agent_width = width.saturating_sub(fixed).max(8);

    let mut style = base;
    if selected {
        style = style.add_modifier(Modifier::BOLD);
    }

    Line::from(vec![
        Span::styled(marker.to_owned(), style),
        Span::styled(glyph.to_owned(), glyph_style),
        Span::styled(
            format!(" {:<18}", truncate_with_ellipsis(&session.id, 18)),
            style,
        ),
        Span::styled(
            format!("  {}", truncate_with_ellipsis(agent, agent_width)),
            style,
        ),
        Span::styled(format!("  {ip}"), style.patch(Style::default().fg(Color::DarkGray))),
        Span::styled(format!("  {seen}"), style),
    ])
}

fn footer_line(list: &SessionListState, total: u64) -> Line<'static> {
    let nav = list.navigable();
    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);

    let shown = list.visible_page().map_or(0, |p| p.edges.len());
    Line::from(vec![
        Span::styled(
            "‹ prev",
            if nav.previous.is_some() && !list.pending {
                enabled
            } else {
                disabled
            },
        ),
        Span::raw("  "),
        Span::styled(
            "next ›",
            if nav.next.is_some() && !list.pending {
                enabled
            } else {
                disabled
            },
        ),
        Span::styled(
            format!("   {shown} shown · {total} total"),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
