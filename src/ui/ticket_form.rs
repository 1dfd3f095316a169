//! Ticket form rendering

use super::components::{render_message, render_submit_button, BUTTON_HEIGHT};
use super::field_renderer::{draw_field, draw_help_text};
use crate::app::App;
use crate::state::forms::{FormDecoration, LifecycleState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Height of the response banner
const MESSAGE_HEIGHT: u16 = 3;

/// Draw the ticket form: fields with inline help, submit button, response banner
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;

    let border_color = match form.form_decoration() {
        FormDecoration::Ready => Color::Cyan,
        FormDecoration::Loading => Color::Yellow,
    };
    let title = match form.lifecycle_state() {
        LifecycleState::Validating | LifecycleState::Submitting => {
            " Write your help-desk ticket (sending) "
        }
        LifecycleState::Failed => " Write your help-desk ticket (not sent) ",
        LifecycleState::Idle | LifecycleState::Fulfilled => " Write your help-desk ticket ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    // Each field gets an input box and one line of help
    let mut constraints = Vec::new();
    for field in form.fields().names() {
        if field.is_multiline() {
            constraints.push(Constraint::Min(5));
        } else {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(MESSAGE_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let field_count = form.fields().len();
    for index in 0..field_count {
        let Some(field) = form.fields().get(index) else {
            continue;
        };
        draw_field(
            frame,
            chunks[index * 2],
            field,
            form.focus() == index,
            form.field_decoration(field.name),
        );
        draw_help_text(frame, chunks[index * 2 + 1], &form.help_text(field.name));
    }

    let button_area = chunks[field_count * 2];
    let button_area = Rect {
        width: button_area.width.min(24),
        ..button_area
    };
    let spinner = app.state.spinner.as_ref().map(|s| s.frame());
    render_submit_button(
        frame,
        button_area,
        &form.submit_button(),
        form.is_submit_focused(),
        spinner.as_deref(),
    );

    let props = form.props();
    render_message(
        frame,
        chunks[field_count * 2 + 1],
        &props.response_message,
        props.show_error,
    );
}
