//! Error types for sql-intellisense.
//!
//! The completion core never fails; these errors cover loading configuration,
//! reading input files, and validating command-line input.

use thiserror::Error;

/// Main error type for sql-intellisense operations.
#[derive(Error, Debug)]
pub enum IntellisenseError {
    /// Configuration errors (unreadable file, invalid TOML/JSON, bad values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system errors while reading SQL input or writing logs.
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid request input (cursor out of range, conflicting arguments, etc.)
    #[error("Input error: {0}")]
    Input(String),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntellisenseError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates an input error with the given message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
            Self::Input(_) => "Input Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

impl From<std::io::Error> for IntellisenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias using IntellisenseError.
pub type Result<T> = std::result::Result<T, IntellisenseError>;
