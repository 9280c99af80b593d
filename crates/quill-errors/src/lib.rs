//! Error facility for Quill
//!
//! Every fallible operation of the logging facade returns [`LogError`].
//! Each error maps to a [`LogErrorKind`] with a stable code that callers
//! and tests can match on without parsing messages.

use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Canonical error kind taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogErrorKind {
    /// Options rejected before any sink was opened
    InvalidConfig,
    /// An output or error-output path could not be opened
    Sink,
    /// One or more sinks failed to synchronize
    Flush,
    /// An entry could not be encoded
    Encode,
    /// Foreign log records could not be routed into the facade
    Redirect,
}

impl LogErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            LogErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            LogErrorKind::Sink => "ERR_SINK",
            LogErrorKind::Flush => "ERR_FLUSH",
            LogErrorKind::Encode => "ERR_ENCODE",
            LogErrorKind::Redirect => "ERR_REDIRECT",
        }
    }
}

/// A single sink that failed to synchronize
#[derive(Debug)]
pub struct SinkFailure {
    pub sink: String,
    pub source: std::io::Error,
}

impl std::fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.sink, self.source)
    }
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("unrecognized level: {name:?}")]
    InvalidLevel { name: String },

    #[error("unrecognized format: {format:?} (expected \"json\" or \"console\")")]
    InvalidFormat { format: String },

    #[error("invalid options: {reason}")]
    InvalidOptions { reason: String },

    #[error("failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read options file {path}: {source}")]
    ReadOptions {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open sink {path:?}: {source}")]
    SinkOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("flush failed for {} sink(s): {}", .failures.len(), join_failures(.failures))]
    Flush { failures: Vec<SinkFailure> },

    #[error("failed to encode entry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("cannot redirect {facility} records: {reason}")]
    Redirect { facility: String, reason: String },
}

fn join_failures(failures: &[SinkFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LogError {
    pub fn kind(&self) -> LogErrorKind {
        match self {
            LogError::InvalidLevel { .. }
            | LogError::InvalidFormat { .. }
            | LogError::InvalidOptions { .. }
            | LogError::Parse(_)
            | LogError::ReadOptions { .. } => LogErrorKind::InvalidConfig,
            LogError::SinkOpen { .. } => LogErrorKind::Sink,
            LogError::Flush { .. } => LogErrorKind::Flush,
            LogError::Encode(_) => LogErrorKind::Encode,
            LogError::Redirect { .. } => LogErrorKind::Redirect,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
