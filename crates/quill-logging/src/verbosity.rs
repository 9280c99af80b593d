//! Verbosity levels
//!
//! Callers ask for `v(n)` output with `n >= 0`; higher `n` is chattier.
//! Verbosity `n` is severity `-n`, so `v(0)` is INFO, `v(1)` is DEBUG, and
//! anything past that sits below DEBUG where the default threshold drops it.

use crate::engine::Caller;
use crate::field::{Arg, Field};
use crate::logger::Logger;
use crate::severity::Severity;
use std::fmt;

/// Highest verbosity the severity scale can represent
pub const MAX_VERBOSITY: i32 = 127;

/// Map a verbosity level onto the severity scale
///
/// Levels are clamped to `0..=127`, so negative levels log at INFO.
pub fn to_severity(level: i32) -> Severity {
    let clamped = level.clamp(0, MAX_VERBOSITY);
    Severity::from_i8(-(clamped as i8))
}

/// A logger bound to one verbosity level
///
/// Every call checks the threshold before looking at its arguments: a
/// disabled `infof` never formats and a disabled `infow` never pulls from
/// its iterator.
#[derive(Debug, Clone)]
pub struct Verbose {
    logger: Logger,
    severity: Severity,
}

impl Verbose {
    pub(crate) fn new(logger: Logger, severity: Severity) -> Self {
        Self { logger, severity }
    }

    pub fn enabled(&self) -> bool {
        self.logger.enabled(self.severity)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        if !self.enabled() {
            return;
        }
        self.logger.log(self.severity, Some(Caller::here()), msg, fields);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        if !self.enabled() {
            return;
        }
        self.logger.log_formatted(self.severity, Caller::here(), args);
    }

    #[track_caller]
    pub fn infow<I>(&self, msg: &str, kv: I)
    where
        I: IntoIterator<Item = Arg>,
    {
        if !self.enabled() {
            return;
        }
        self.logger.log_sugared(self.severity, Caller::here(), msg, kv);
    }
}
