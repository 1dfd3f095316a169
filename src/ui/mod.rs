//! UI module for rendering the TUI

mod components;
mod field_renderer;
mod layout;
mod ticket_form;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    ticket_form::draw(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);
}
