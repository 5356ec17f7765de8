//! Error types for CodeCity operations.
//!
//! [`CodeCityError`] wraps every failure the builder can report, from
//! reading input to exporting a finished layout.

use std::io;

use thiserror::Error;

use codecity_history::HistoryError;

/// The main error type for CodeCity operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the JSON error, so the
/// failing line can be shown in a report.
#[derive(Debug, Error)]
pub enum CodeCityError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse {
        err: serde_json::Error,
        src: String,
    },

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Structure error: {0}")]
    Structure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for CodeCityError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl CodeCityError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
