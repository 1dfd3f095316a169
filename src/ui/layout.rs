//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::{COPY_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Login status
    let props = app.form.props();
    if props.is_authenticated {
        spans.push(Span::styled(" ● ", Style::default().fg(Color::Green)));
    } else {
        spans.push(Span::styled(" ○ ", Style::default().fg(Color::Red)));
    }

    spans.push(Span::styled(
        key_hints(app.form.is_submit_focused()),
        Style::default().fg(Color::DarkGray),
    ));

    if !props.is_authenticated {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(login_hint(app), Style::default().fg(Color::Yellow)));
    }

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Keyboard hints for the current focus
fn key_hints(on_button: bool) -> String {
    if on_button {
        format!("Enter:send  {SUBMIT_SHORTCUT}:send  Tab:next  {COPY_SHORTCUT}:copy  Esc:quit")
    } else {
        format!("Tab:next  Shift+Tab:prev  {SUBMIT_SHORTCUT}:send  {COPY_SHORTCUT}:copy  Esc:quit")
    }
}

fn login_hint(app: &App) -> String {
    match &app.state.config_path {
        Some(path) => format!("Set agent_name and agent_email in {}", path.display()),
        None => "Set TICKET_AGENT_NAME and TICKET_AGENT_EMAIL".to_string(),
    }
}
