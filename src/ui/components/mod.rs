//! Reusable UI components

mod button;
mod message;

pub use button::{render_submit_button, BUTTON_HEIGHT};
pub use message::render_message;
