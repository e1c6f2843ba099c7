//! Pipeline error types.
//!
//! Configuration problems are fatal; per-document read problems are
//! recovered where they happen and only logged.

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline error types with enough context to act on
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Configuration error (bad lexicon, bad pattern, bad year range)
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Invalid bytes in a text file; the text was recovered with replacement characters
    #[error("Decode error in {path:?}: {message}")]
    Decode {
        /// File containing the invalid bytes.
        path: PathBuf,
        /// What was wrong with the bytes.
        message: String,
    },

    /// Nothing to analyze
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Malformed input table
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a decode error for a file
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode { path: path.into(), message: message.into() }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Whether this error aborts the run or is only worth a warning
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::Parse { file: None, message: e.to_string() }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse { file: None, message: e.to_string() }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn config_error_carries_hint() {
        let err = Error::config("label 'I' repeats", "Labels must be unique within a lexicon");
        let msg = err.to_string();
        assert!(msg.contains("label 'I' repeats"));
        assert!(msg.contains("unique"));
    }

    #[test]
    fn only_decode_errors_are_recoverable() {
        assert!(Error::decode("a.txt", "invalid byte 0xff").is_recoverable());
        assert!(!Error::EmptyInput("no documents".into()).is_recoverable());
        assert!(!Error::config("x", "y").is_recoverable());
    }
}
