//! Running jobs table, shortest wall time first.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::ui::table::{column_widths, index_width};
use crate::ui::theme::{header_style, INDEX};
use crate::view::{JobRow, JOB_COLUMNS};

pub fn draw_jobs(f: &mut ratatui::Frame<'_>, area: Rect, rows: &[JobRow]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("plots ({} running)", rows.len()));

    let mut widths = vec![index_width(rows.len())];
    widths.extend(column_widths(JOB_COLUMNS, rows));

    let header = Row::new(
        std::iter::once("#").chain(JOB_COLUMNS.iter().map(|(label, _)| *label)),
    )
    .style(header_style());

    let body = rows.iter().enumerate().map(|(i, row)| {
        let mut cells = vec![Cell::from(i.to_string()).style(Style::default().fg(INDEX))];
        cells.extend(JOB_COLUMNS.iter().map(|(_, get)| Cell::from(get(row))));
        Row::new(cells)
    });

    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    f.render_widget(table, area);
}
