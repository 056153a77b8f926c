//! Shared UI theme constants.

use ratatui::style::{Color, Modifier, Style};

pub const READY: Color = Color::Green;
pub const NOT_READY: Color = Color::Red;
pub const INDEX: Color = Color::DarkGray;

pub fn header_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}
