//! Error types for the atomcss crate.
//!
//! Only structural failures are errors. Data problems that the atomizer can
//! work around (a declaration missing its value, an unsupported at-rule) are
//! recorded as [`Diagnostic`](crate::Diagnostic)s instead and never abort a run.

use thiserror::Error;

/// Errors that can occur while reading configuration or parsing CSS.
#[derive(Debug, Error)]
pub enum AtomizeError {
    /// The stylesheet could not be parsed into rules.
    #[error("{line}:{column}: {message}")]
    Parse {
        /// 1-based line of the offending token.
        line: u32,
        /// 1-based column of the offending token.
        column: u32,
        /// What the parser expected or found.
        message: String,
    },

    /// Reading a stylesheet or config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file could not be deserialized.
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for AtomizeError {
    fn from(err: serde_yaml::Error) -> Self {
        AtomizeError::Config(err.to_string())
    }
}

/// Result type for atomcss operations.
pub type Result<T> = std::result::Result<T, AtomizeError>;
