//! Quill: a structured-logging facade
//!
//! A [`Logger`] is built once from [`Options`] and passed around. It offers
//! seven severities (debug, info, warn, error, dpanic, panic, fatal), each
//! with typed-field, formatted and key-value forms, plus derivations that
//! name a logger, attach fields, or bind it to a verbosity level.
//!
//! ```
//! use quill_logging::{kv, test_capture::capture_logger, Field, Options};
//!
//! let (logger, capture) = capture_logger(&Options::default());
//! let auth = logger.named("auth").with(&[Field::new("tenant", "acme")]);
//! auth.infow("login", kv!["user", "alice", "attempt", 1]);
//! auth.v(2).info("not shown at the default level", &[]);
//!
//! capture.assert_entry_exists("login");
//! assert_eq!(capture.entries().len(), 1);
//! ```
//!
//! Requests carry a logger and their ambient identifiers in a [`Carrier`];
//! [`bridge`] routes a severity-routed facility into a logger, and
//! [`redirect`] does the same for the `log` and `tracing` crates.

pub mod bridge;
pub mod context;
mod engine;
pub mod field;
pub mod global;
pub mod logger;
pub mod options;
pub mod redirect;
pub mod sanitize;
pub mod severity;
pub mod test_capture;
pub mod verbosity;

pub use bridge::{BridgeSeverity, SeverityLog, SeverityOutputs, SeverityWriter};
pub use context::{attach, extract, AmbientKey, Carrier};
pub use engine::Sink;
pub use field::{Arg, Field, Value};
pub use logger::{ExitHook, Logger, LoggerBuilder, ProcessExit};
pub use options::{Format, Options, Sampling};
pub use quill_core_types::{RequestId, WatcherId};
pub use quill_errors::{LogError, LogErrorKind, Result};
pub use sanitize::{sanitize, MalformedArgs, Sanitized};
pub use severity::Severity;
pub use verbosity::{to_severity, Verbose};
