//! Typed failures and their classification at the top level.
//!
//! The sanitizer and the input resolution steps raise the typed errors below;
//! everything else travels as a plain [`anyhow::Error`] with context and is
//! reported as an unexpected error.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::ColumnType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SanitizeError {
    #[error(
        "Column '{column}' not found in the table. Please verify that the column name is correct."
    )]
    ColumnNotFound { column: String },
    #[error("Column '{column}' is not numeric (found {actual}). Please select a numeric column.")]
    NotNumericColumn { column: String, actual: ColumnType },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Input file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },
    #[error(
        "Could not infer file type from extension of {}. Please specify using --file_type.",
        .path.display()
    )]
    UnknownFileType { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    UnknownFileType,
    ColumnNotFound,
    NotNumericColumn,
    Unexpected,
}

impl ErrorKind {
    pub fn classify(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(err) = cause.downcast_ref::<SanitizeError>() {
                return match err {
                    SanitizeError::ColumnNotFound { .. } => ErrorKind::ColumnNotFound,
                    SanitizeError::NotNumericColumn { .. } => ErrorKind::NotNumericColumn,
                };
            }
            if let Some(err) = cause.downcast_ref::<InputError>() {
                return match err {
                    InputError::FileNotFound { .. } => ErrorKind::FileNotFound,
                    InputError::UnknownFileType { .. } => ErrorKind::UnknownFileType,
                };
            }
        }
        ErrorKind::Unexpected
    }

    /// Leading text for the top-level log line. Input errors already read as
    /// complete sentences.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            ErrorKind::NotNumericColumn => Some("Type error"),
            ErrorKind::Unexpected => Some("An unexpected error occurred"),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        1
    }

    /// The sanitizer already logs a missing column where it detects it.
    pub fn logged_at_origin(&self) -> bool {
        matches!(self, ErrorKind::ColumnNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn classify_walks_context_chain() {
        let err = Err::<(), _>(SanitizeError::NotNumericColumn {
            column: "name".into(),
            actual: ColumnType::String,
        })
        .context("Sanitizing column 'name'")
        .unwrap_err();
        assert_eq!(ErrorKind::classify(&err), ErrorKind::NotNumericColumn);

        let err = anyhow::Error::new(InputError::UnknownFileType {
            path: PathBuf::from("data"),
        });
        assert_eq!(ErrorKind::classify(&err), ErrorKind::UnknownFileType);

        let err = anyhow!("disk on fire");
        assert_eq!(ErrorKind::classify(&err), ErrorKind::Unexpected);
    }

    #[test]
    fn only_missing_column_is_logged_at_origin() {
        assert!(ErrorKind::ColumnNotFound.logged_at_origin());
        assert!(!ErrorKind::NotNumericColumn.logged_at_origin());
        assert!(!ErrorKind::Unexpected.logged_at_origin());
        assert_eq!(ErrorKind::FileNotFound.exit_code(), 1);
        assert_eq!(ErrorKind::FileNotFound.prefix(), None);
        assert_eq!(ErrorKind::NotNumericColumn.prefix(), Some("Type error"));
    }

    #[test]
    fn messages_name_the_column_and_type() {
        let err = SanitizeError::NotNumericColumn {
            column: "name".into(),
            actual: ColumnType::String,
        };
        assert_eq!(
            err.to_string(),
            "Column 'name' is not numeric (found string). Please select a numeric column."
        );
    }
}
