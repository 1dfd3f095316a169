//! Field rendering utilities for forms

use crate::state::forms::{FieldDecoration, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw one bound field: label on the border, value inside
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    decoration: FieldDecoration,
) {
    let border_style = match (decoration, is_active) {
        (FieldDecoration::Error, _) => Style::default().fg(Color::Red),
        (FieldDecoration::Normal, true) => Style::default().fg(Color::Cyan),
        (FieldDecoration::Normal, false) => Style::default().fg(Color::DarkGray),
    };

    let cursor = Span::styled(
        if is_active { "▌" } else { "" },
        Style::default().fg(Color::Cyan),
    );

    let content = if field.value.is_empty() {
        let placeholder = Span::styled(
            field.name.placeholder(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        );
        if is_active {
            Paragraph::new(Line::from(vec![cursor]))
        } else {
            Paragraph::new(Line::from(vec![placeholder]))
        }
    } else if field.is_multiline() {
        let mut lines: Vec<Line> = field
            .value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![Span::raw(field.value.as_str()), cursor]))
    };

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Inline validation help under a field
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(format!(" {text}")).style(Style::default().fg(Color::Red));
    frame.render_widget(help, area);
}
