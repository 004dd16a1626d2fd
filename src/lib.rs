pub mod cli;
pub mod csv_io;
pub mod data;
pub mod error;
pub mod format;
pub mod frame;
pub mod io_utils;
pub mod json_io;
pub mod sanitize;
pub mod table;

use std::{env, ffi::OsString, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug, error, info};

use crate::{
    cli::Cli,
    error::ErrorKind,
    format::{FileType, FormatOptions},
    io_utils::DEFAULT_CSV_DELIMITER,
};

static LOGGER: OnceLock<()> = OnceLock::new();

/// Installs the process logger once. `RUST_LOG`, when set, overrides `level`.
pub fn init_logging(level: LevelFilter) {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sanitize_precision", level);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

/// Parses `args`, runs one sanitization and returns the process exit code.
pub fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() { 1 } else { 0 };
        }
    };
    init_logging(cli.log_level());
    match execute(&cli) {
        Ok(()) => 0,
        Err(err) => report_failure(&err),
    }
}

/// Logs a failure once and maps it to an exit code.
pub fn report_failure(err: &anyhow::Error) -> i32 {
    let kind = ErrorKind::classify(err);
    if !kind.logged_at_origin() {
        match kind.prefix() {
            Some(prefix) => error!("{prefix}: {err:#}"),
            None => error!("{err:#}"),
        }
    }
    kind.exit_code()
}

pub fn execute(cli: &Cli) -> Result<()> {
    let file_type = format::resolve_file_type(&cli.input_file, cli.file_type)?;
    let delimiter = cli.delimiter.unwrap_or(DEFAULT_CSV_DELIMITER);
    let input_encoding = io_utils::resolve_encoding(cli.input_encoding.as_deref())?;
    let output_encoding = match cli.output_encoding.as_deref() {
        Some(label) => io_utils::resolve_encoding(Some(label))?,
        None => input_encoding,
    };
    if file_type == FileType::Csv {
        debug!(
            "Using delimiter '{}' and encoding {} -> {}",
            printable_delimiter(delimiter),
            input_encoding.name(),
            output_encoding.name()
        );
    }

    let input_options = FormatOptions {
        delimiter,
        encoding: input_encoding,
    };
    let mut table = format::load_table(&cli.input_file, file_type, &input_options)?;

    let rounded = sanitize::sanitize_in_place(&mut table, &cli.column_name, cli.precision)?;
    info!(
        "Rounded {} value(s) in column '{}' to precision {}",
        rounded, cli.column_name, cli.precision
    );

    if cli.preview {
        print!("{}", crate::table::render_preview(&table, cli.preview_rows));
        return Ok(());
    }

    let output = cli.output_path();
    let output_options = FormatOptions {
        delimiter,
        encoding: output_encoding,
    };
    format::write_table(&table, output, file_type, &output_options)?;
    info!(
        "Data sanitization complete. Output written to {}",
        if io_utils::is_dash(output) {
            "stdout".to_string()
        } else {
            output.display().to_string()
        }
    );
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
