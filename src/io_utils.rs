//! Whole-file I/O shared by the CSV and JSON codecs.
//!
//! - **stdin/stdout**: the `-` path routes through standard streams.
//! - **Encoding**: input bytes are decoded and output text encoded via
//!   `encoding_rs`, defaulting to UTF-8.
//! - **Atomic output**: files are written to a sibling temporary file and
//!   renamed over the destination, so overwriting the input in place never
//!   leaves a half-written file behind.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};
use log::debug;
use tempfile::NamedTempFile;

use crate::error::InputError;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn encode_text(text: &str, encoding: &'static Encoding) -> Result<Vec<u8>> {
    if encoding == UTF_8 {
        return Ok(text.as_bytes().to_vec());
    }
    let (encoded, _, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(anyhow!("Failed to encode text using {}", encoding.name()));
    }
    Ok(encoded.into_owned())
}

/// Reads and decodes the whole input. A missing file is reported as
/// [`InputError::FileNotFound`].
pub fn read_input(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes = if is_dash(path) {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("Reading from stdin")?;
        buffer
    } else {
        match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(InputError::FileNotFound {
                    path: path.to_path_buf(),
                }
                .into());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Opening input file {path:?}"));
            }
        }
    };
    debug!("Read {} byte(s) from {:?}", bytes.len(), path);
    decode_bytes(&bytes, encoding).with_context(|| format!("Decoding input file {path:?}"))
}

/// Encodes `text` and writes it to `path`, or stdout for `-`.
pub fn write_output(path: &Path, text: &str, encoding: &'static Encoding) -> Result<()> {
    let bytes = encode_text(text, encoding)?;
    if is_dash(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&bytes).context("Writing to stdout")?;
        return stdout.flush().context("Flushing stdout");
    }
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(parent)
        .with_context(|| format!("Creating temporary file next to {path:?}"))?;
    staged
        .write_all(&bytes)
        .with_context(|| format!("Writing output for {path:?}"))?;
    staged
        .as_file()
        .sync_all()
        .with_context(|| format!("Syncing output for {path:?}"))?;
    staged
        .persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Replacing output file {path:?}"))?;
    debug!("Wrote {} byte(s) to {:?}", bytes.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use encoding_rs::WINDOWS_1252;
    use tempfile::tempdir;

    #[test]
    fn resolve_encoding_accepts_labels() {
        assert_eq!(resolve_encoding(None).unwrap(), UTF_8);
        assert_eq!(resolve_encoding(Some(" latin1 ")).unwrap(), WINDOWS_1252);
        assert!(resolve_encoding(Some("klingon")).is_err());
    }

    #[test]
    fn read_input_reports_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_input(&dir.path().join("absent.csv"), UTF_8).unwrap_err();
        assert_eq!(ErrorKind::classify(&err), ErrorKind::FileNotFound);
    }

    #[test]
    fn write_output_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "old contents that are longer than the new ones").unwrap();
        write_output(&path, "new", UTF_8).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn write_then_read_transcodes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        write_output(&path, "café", WINDOWS_1252).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"caf\xe9");
        assert_eq!(read_input(&path, WINDOWS_1252).unwrap(), "café");
    }
}
