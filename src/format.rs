use std::{fmt, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use encoding_rs::{Encoding, UTF_8};
use log::info;

use crate::{
    csv_io,
    error::InputError,
    frame::Table,
    io_utils::{self, DEFAULT_CSV_DELIMITER},
    json_io,
};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum FileType {
    Csv,
    Json,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Json => "json",
        }
    }

    fn from_extension(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Some(FileType::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(FileType::Json),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the explicit file type when given, otherwise infers it from the
/// input's extension.
pub fn resolve_file_type(path: &Path, provided: Option<FileType>) -> Result<FileType> {
    if let Some(file_type) = provided {
        return Ok(file_type);
    }
    let inferred = FileType::from_extension(path).ok_or_else(|| InputError::UnknownFileType {
        path: path.to_path_buf(),
    })?;
    info!("File type inferred: {inferred}");
    Ok(inferred)
}

/// Codec settings shared by loading and writing.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_CSV_DELIMITER,
            encoding: UTF_8,
        }
    }
}

pub fn load_table(path: &Path, file_type: FileType, options: &FormatOptions) -> Result<Table> {
    let text = io_utils::read_input(path, options.encoding)?;
    let table = match file_type {
        FileType::Csv => csv_io::parse_table(&text, options.delimiter),
        FileType::Json => json_io::parse_table(&text),
    }
    .with_context(|| format!("Loading {file_type} from {path:?}"))?;
    info!(
        "Loaded {} row(s) across {} column(s) from {:?}",
        table.row_count(),
        table.column_count(),
        path
    );
    Ok(table)
}

pub fn render_table(table: &Table, file_type: FileType, options: &FormatOptions) -> Result<String> {
    match file_type {
        FileType::Csv => csv_io::render_table(table, options.delimiter),
        FileType::Json => json_io::render_table(table),
    }
}

pub fn write_table(
    table: &Table,
    path: &Path,
    file_type: FileType,
    options: &FormatOptions,
) -> Result<()> {
    let text = render_table(table, file_type, options)?;
    io_utils::write_output(path, &text, options.encoding)
        .with_context(|| format!("Writing {file_type} to {path:?}"))
}
