//! Error types for mdfix library.

use std::io;
use thiserror::Error;

/// Result type alias for mdfix operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while fixing Markdown files.
///
/// The line transformer itself never fails; every variant here comes from
/// the file driver or from parsing user-supplied rule codes.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file is not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A markdownlint rule code that mdfix does not know.
    #[error("Unknown rule: {0}")]
    InvalidRule(String),
}
