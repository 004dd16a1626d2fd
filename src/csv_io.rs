use anyhow::{Context, Result};

use crate::{
    data::{parse_cell, render_cell},
    frame::Table,
};

fn reader_builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false);
    builder
}

/// Parses CSV text with a header row into a typed table.
pub fn parse_table(text: &str, delimiter: u8) -> Result<Table> {
    let mut reader = reader_builder(delimiter).from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .context("Reading CSV header row")?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // Header is line 1.
        let record = record.with_context(|| format!("Reading row {}", idx + 2))?;
        rows.push(record.iter().map(parse_cell).collect::<Vec<_>>());
    }
    Table::from_rows(headers, rows).context("Assembling CSV table")
}

/// Renders a table as CSV text: header line, then one line per row.
pub fn render_table(table: &Table, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Necessary)
        .double_quote(true)
        .from_writer(Vec::new());
    writer
        .write_record(table.headers())
        .context("Writing output headers")?;
    for (idx, row) in table.rows().enumerate() {
        writer
            .write_record(row.into_iter().map(render_cell))
            .with_context(|| format!("Writing output row {}", idx + 2))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| err.into_error())
        .context("Flushing CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
