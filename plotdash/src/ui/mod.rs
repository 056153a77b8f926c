//! Screen layout: header, jobs table, disks (tmp | dst), archive, logs.

pub mod disks;
pub mod header;
pub mod jobs;
pub mod table;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Borders},
};

use crate::view::Frame;

pub fn draw(f: &mut ratatui::Frame<'_>, frame: &Frame, host: &str) {
    let area = f.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),   // header
            Constraint::Ratio(2, 5), // plots
            Constraint::Ratio(1, 4), // disks
            Constraint::Ratio(1, 8), // archive
            Constraint::Min(3),      // logs
        ])
        .split(area);

    header::draw_header(f, rows[0], frame, host);
    jobs::draw_jobs(f, rows[1], &frame.jobs);

    let disks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    disks::draw_tmp(f, disks[0], &frame.tmp);
    disks::draw_dst(f, disks[1]);

    // not populated by the dashboard yet
    f.render_widget(Block::default().borders(Borders::ALL).title("archive"), rows[3]);
    f.render_widget(Block::default().borders(Borders::ALL).title("logs"), rows[4]);
}
