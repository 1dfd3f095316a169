//! Button component for TUI

use crate::state::forms::{ButtonKind, SubmitButton};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    accent: Color,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(accent)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent)
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render the form's submit button; `spinner` replaces the label while loading
pub fn render_submit_button(
    frame: &mut Frame,
    area: Rect,
    button: &SubmitButton,
    is_selected: bool,
    spinner: Option<&str>,
) {
    let accent = match button.kind {
        ButtonKind::Success => Color::Green,
        ButtonKind::Error => Color::Red,
    };

    let content = match spinner {
        Some(frame_text) if button.is_loading => frame_text,
        _ => button.label,
    };

    render_button(frame, area, content, accent, is_selected, !button.is_disabled);
}
