//! Response banner shown under the form

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the last submission response; nothing when there is none
pub fn render_message(frame: &mut Frame, area: Rect, text: &str, show_error: bool) {
    if text.is_empty() {
        return;
    }

    let color = if show_error { Color::Red } else { Color::Green };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(paragraph, area);
}
