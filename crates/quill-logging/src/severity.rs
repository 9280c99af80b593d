//! Severity scale understood by the engine
//!
//! Severities are small signed integers: larger is more important, and
//! everything below [`Severity::INFO`] is increasingly verbose debug output.
//! The named severities match the familiar
//! debug < info < warn < error < dpanic < panic < fatal ordering.

use quill_errors::LogError;
use std::fmt;
use std::str::FromStr;

/// The default severity is [`Severity::INFO`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Severity(i8);

impl Severity {
    pub const DEBUG: Severity = Severity(-1);
    pub const INFO: Severity = Severity(0);
    pub const WARN: Severity = Severity(1);
    pub const ERROR: Severity = Severity(2);
    /// Developer panic: panics in development mode, logs otherwise
    pub const DPANIC: Severity = Severity(3);
    pub const PANIC: Severity = Severity(4);
    pub const FATAL: Severity = Severity(5);

    /// Construct a severity from its raw rank
    pub const fn from_i8(rank: i8) -> Self {
        Severity(rank)
    }

    pub const fn as_i8(self) -> i8 {
        self.0
    }

    /// Lower-case name as accepted by [`FromStr`], if this is a named severity
    pub fn name(self) -> Option<&'static str> {
        match self {
            Severity::DEBUG => Some("debug"),
            Severity::INFO => Some("info"),
            Severity::WARN => Some("warn"),
            Severity::ERROR => Some("error"),
            Severity::DPANIC => Some("dpanic"),
            Severity::PANIC => Some("panic"),
            Severity::FATAL => Some("fatal"),
            _ => None,
        }
    }

    /// Capitalized label used by the encoders, e.g. `INFO` or `LEVEL(-3)`
    pub fn label(self) -> String {
        match self.name() {
            Some(name) => name.to_ascii_uppercase(),
            None => format!("LEVEL({})", self.0),
        }
    }

    /// Map a `tracing` level onto the scale; TRACE lands one step below DEBUG
    pub fn from_tracing_level(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Severity::ERROR,
            tracing::Level::WARN => Severity::WARN,
            tracing::Level::INFO => Severity::INFO,
            tracing::Level::DEBUG => Severity::DEBUG,
            tracing::Level::TRACE => Severity(-2),
        }
    }

    pub fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::ERROR,
            log::Level::Warn => Severity::WARN,
            log::Level::Info => Severity::INFO,
            log::Level::Debug => Severity::DEBUG,
            log::Level::Trace => Severity(-2),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    /// Parse a level name, case-insensitively. `warning` is accepted as an
    /// alias of `warn`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::DEBUG),
            "info" => Ok(Severity::INFO),
            "warn" | "warning" => Ok(Severity::WARN),
            "error" => Ok(Severity::ERROR),
            "dpanic" => Ok(Severity::DPANIC),
            "panic" => Ok(Severity::PANIC),
            "fatal" => Ok(Severity::FATAL),
            _ => Err(LogError::InvalidLevel {
                name: s.to_string(),
            }),
        }
    }
}
