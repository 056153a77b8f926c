//! Top header with host, tick counter and sample time.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::view::Frame;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, frame: &Frame, host: &str) {
    let title = format!(
        "plotdash | host: {host} | tick {} at {}  (press 'q' to quit)",
        frame.tick, frame.sampled_at
    );
    f.render_widget(Block::default().title(title).borders(Borders::NONE), area);
}
