//! Aligned plain-text rendering of a table, used by `--preview`.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::{data::render_cell, frame::Table};

/// Renders the header, a dashed separator and up to `limit` rows.
pub fn render_preview(table: &Table, limit: usize) -> String {
    let headers = table.headers();
    let rows = table
        .rows()
        .take(limit)
        .map(|row| row.into_iter().map(render_cell).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }
    for width in &mut widths {
        *width = (*width).max(3);
    }
    let separators = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(&headers, &widths));
    let _ = writeln!(output, "{}", format_row(&separators, &widths));
    for row in &rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    if table.row_count() > rows.len() {
        let _ = writeln!(
            output,
            "({} of {} row(s) shown)",
            rows.len(),
            table.row_count()
        );
    }
    output
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let flattened = flatten_whitespace(cell);
            let padding = width.saturating_sub(display_width(&flattened));
            format!("{flattened}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    line.truncate(line.trim_end().len());
    line
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn flatten_whitespace(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
