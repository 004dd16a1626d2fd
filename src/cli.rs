use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::format::FileType;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Reduce the precision of a numeric column in a CSV or JSON file",
    long_about = None
)]
pub struct Cli {
    /// Input CSV or JSON file ("-" reads stdin and requires --file_type)
    pub input_file: PathBuf,
    /// Name of the column to sanitize
    pub column_name: String,
    /// Decimal places to round to; negative values round to tens, hundreds, ...
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub precision: i32,
    /// Output file (the input is overwritten if omitted; "-" writes stdout)
    #[arg(short = 'o', long = "output_file", visible_alias = "output-file")]
    pub output_file: Option<PathBuf>,
    /// File type; inferred from the input extension (.csv, .json) if omitted
    #[arg(long = "file_type", visible_alias = "file-type", value_enum)]
    pub file_type: Option<FileType>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Character encoding of the output (defaults to the input encoding)
    #[arg(long = "output-encoding")]
    pub output_encoding: Option<String>,
    /// Print the sanitized rows as a table instead of writing any file
    #[arg(long)]
    pub preview: bool,
    /// Number of rows shown by --preview
    #[arg(long = "preview-rows", default_value_t = 10)]
    pub preview_rows: usize,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Destination of the sanitized table; defaults to the input itself.
    pub fn output_path(&self) -> &Path {
        self.output_file.as_deref().unwrap_or(&self.input_file)
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
