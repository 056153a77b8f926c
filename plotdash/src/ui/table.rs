//! Tables driven by a fixed `(label, accessor)` column list.

use ratatui::layout::Constraint;

use crate::view::Column;

/// Fit each column to its widest cell, header included.
pub fn column_widths<R>(columns: &[Column<R>], rows: &[R]) -> Vec<Constraint> {
    columns
        .iter()
        .map(|(label, get)| {
            let widest = rows
                .iter()
                .map(|r| get(r).chars().count())
                .max()
                .unwrap_or(0)
                .max(label.chars().count());
            Constraint::Length(widest as u16)
        })
        .collect()
}

pub fn index_width(rows: usize) -> Constraint {
    let digits = rows.saturating_sub(1).max(1).to_string().len();
    Constraint::Length(digits as u16)
}
