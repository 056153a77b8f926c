//! Disks region: tmp directory readiness on the left, dst on the right.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::ui::table::column_widths;
use crate::ui::theme::{header_style, NOT_READY, READY};
use crate::view::{TmpRow, TMP_COLUMNS};

pub fn draw_tmp(f: &mut ratatui::Frame<'_>, area: Rect, rows: &[TmpRow]) {
    let header =
        Row::new(TMP_COLUMNS.iter().map(|(label, _)| *label)).style(header_style());

    let body = rows.iter().map(|row| {
        let color = if row.ready { READY } else { NOT_READY };
        Row::new(TMP_COLUMNS.iter().map(|(label, get)| {
            let cell = Cell::from(get(row));
            if *label == "ready" {
                cell.style(Style::default().fg(color))
            } else {
                cell
            }
        }))
    });

    let table = Table::new(body, column_widths(TMP_COLUMNS, rows))
        .header(header)
        .column_spacing(2)
        .block(Block::default().borders(Borders::ALL).title("tmp"));
    f.render_widget(table, area);
}

pub fn draw_dst(f: &mut ratatui::Frame<'_>, area: Rect) {
    f.render_widget(Block::default().borders(Borders::ALL).title("dst"), area);
}
