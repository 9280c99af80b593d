//! Bridge from a severity-routed logging facility
//!
//! A severity-routed facility formats each message itself and hands the
//! finished line, newline included, to a writer registered per severity
//! tier. [`install`] registers one [`SeverityWriter`] per tier so those
//! lines end up as leveled entries on a [`Logger`].
//!
//! [`SeverityLog`] is such a facility for code that wants the
//! `info/warning/error/fatal` style without depending on the facade.

use crate::logger::Logger;
use crate::severity::Severity;
use std::io::{self, Write};
use std::sync::{Mutex, OnceLock, PoisonError};

/// Severity tiers of a severity-routed facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeSeverity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl BridgeSeverity {
    pub const ALL: [BridgeSeverity; 4] = [
        BridgeSeverity::Info,
        BridgeSeverity::Warning,
        BridgeSeverity::Error,
        BridgeSeverity::Fatal,
    ];

    /// The facade severity lines of this tier are logged at
    pub fn severity(self) -> Severity {
        match self {
            BridgeSeverity::Info => Severity::INFO,
            BridgeSeverity::Warning => Severity::WARN,
            BridgeSeverity::Error => Severity::ERROR,
            BridgeSeverity::Fatal => Severity::FATAL,
        }
    }

    fn index(self) -> usize {
        match self {
            BridgeSeverity::Info => 0,
            BridgeSeverity::Warning => 1,
            BridgeSeverity::Error => 2,
            BridgeSeverity::Fatal => 3,
        }
    }
}

impl std::str::FromStr for BridgeSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(BridgeSeverity::Info),
            "warning" | "warn" => Ok(BridgeSeverity::Warning),
            "error" => Ok(BridgeSeverity::Error),
            "fatal" => Ok(BridgeSeverity::Fatal),
            _ => Err(format!("unknown severity tier: {}", s)),
        }
    }
}

/// Registration surface of a severity-routed facility
pub trait SeverityOutputs {
    fn set_output_by_severity(&self, severity: BridgeSeverity, writer: Box<dyn Write + Send>);
}

/// Turns each written line into one entry at a fixed severity
#[derive(Debug, Clone)]
pub struct SeverityWriter {
    logger: Logger,
    severity: Severity,
}

impl SeverityWriter {
    pub fn new(logger: Logger, tier: BridgeSeverity) -> Self {
        Self {
            logger,
            severity: tier.severity(),
        }
    }
}

impl Write for SeverityWriter {
    /// Logs `buf` without its final byte (the facility's newline) and
    /// reports the whole buffer as written. A fatal-tier write does not
    /// return unless the logger's exit hook returns.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some((_, line)) = buf.split_last() else {
            return Ok(0);
        };
        let message = String::from_utf8_lossy(line);
        self.logger.log(self.severity, None, &message, &[]);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.logger.flush().map_err(io::Error::other)
    }
}

/// Route every tier of `outputs` into `logger`
pub fn install(outputs: &dyn SeverityOutputs, logger: &Logger) {
    for tier in BridgeSeverity::ALL {
        outputs.set_output_by_severity(tier, Box::new(SeverityWriter::new(logger.clone(), tier)));
    }
}

type Slot = Mutex<Option<Box<dyn Write + Send>>>;

/// A minimal severity-routed facility
///
/// Each tier writes `message + "\n"` to its registered writer, or to
/// stderr while none is registered. Tiers do not cascade into each other.
#[derive(Default)]
pub struct SeverityLog {
    slots: [Slot; 4],
}

impl SeverityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide instance [`Logger::new`] registers itself with
    pub fn global() -> &'static SeverityLog {
        static GLOBAL: OnceLock<SeverityLog> = OnceLock::new();
        GLOBAL.get_or_init(SeverityLog::new)
    }

    /// # Errors
    ///
    /// Returns the error of the underlying writer.
    pub fn log(&self, tier: BridgeSeverity, message: &str) -> io::Result<()> {
        let mut line = String::with_capacity(message.len() + 1);
        line.push_str(message);
        line.push('\n');

        let mut slot = self.slots[tier.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match slot.as_mut() {
            Some(writer) => writer.write_all(line.as_bytes()),
            None => io::stderr().lock().write_all(line.as_bytes()),
        }
    }

    /// # Errors
    ///
    /// Returns the error of the underlying writer.
    pub fn info(&self, message: &str) -> io::Result<()> {
        self.log(BridgeSeverity::Info, message)
    }

    /// # Errors
    ///
    /// Returns the error of the underlying writer.
    pub fn warning(&self, message: &str) -> io::Result<()> {
        self.log(BridgeSeverity::Warning, message)
    }

    /// # Errors
    ///
    /// Returns the error of the underlying writer.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.log(BridgeSeverity::Error, message)
    }

    /// # Errors
    ///
    /// Returns the error of the underlying writer.
    pub fn fatal(&self, message: &str) -> io::Result<()> {
        self.log(BridgeSeverity::Fatal, message)
    }
}

impl SeverityOutputs for SeverityLog {
    fn set_output_by_severity(&self, severity: BridgeSeverity, writer: Box<dyn Write + Send>) {
        *self.slots[severity.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(writer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_severities() {
        assert_eq!(BridgeSeverity::Info.severity(), Severity::INFO);
        assert_eq!(BridgeSeverity::Warning.severity(), Severity::WARN);
        assert_eq!(BridgeSeverity::Error.severity(), Severity::ERROR);
        assert_eq!(BridgeSeverity::Fatal.severity(), Severity::FATAL);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("WARNING".parse::<BridgeSeverity>(), Ok(BridgeSeverity::Warning));
        assert!("debug".parse::<BridgeSeverity>().is_err());
    }

    #[test]
    fn test_tiers_do_not_cascade() {
        #[derive(Clone, Default)]
        struct Shared(std::sync::Arc<Mutex<Vec<u8>>>);
        impl Write for Shared {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let log = SeverityLog::new();
        let info = Shared::default();
        let error = Shared::default();
        log.set_output_by_severity(BridgeSeverity::Info, Box::new(info.clone()));
        log.set_output_by_severity(BridgeSeverity::Error, Box::new(error.clone()));

        log.error("disk full").unwrap();

        assert!(info.0.lock().unwrap().is_empty());
        assert_eq!(error.0.lock().unwrap().as_slice(), b"disk full\n");
    }
}
