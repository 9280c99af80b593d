//! Test capture mode for deterministic logging assertions
//!
//! A capture sink records entries as structured values instead of encoded
//! lines, so tests can assert on severity, message and fields directly.

use crate::engine::{Record, Sink};
use crate::field::{Field, Value};
use crate::logger::Logger;
use crate::options::Options;
use crate::severity::Severity;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

/// A captured entry with all its fields
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedEntry {
    pub severity: Severity,
    pub logger: Option<String>,
    pub message: String,
    /// Attached fields followed by the call's own fields
    pub fields: Vec<Field>,
}

impl CapturedEntry {
    pub(crate) fn from_record(record: &Record<'_>) -> Self {
        Self {
            severity: record.severity,
            logger: record.logger.map(str::to_string),
            message: record.message.to_string(),
            fields: record.all_fields().cloned().collect(),
        }
    }

    /// Value of the first field named `key`
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.key() == key)
            .map(Field::value)
    }
}

/// Handle for reading captured entries in tests
#[derive(Clone, Debug, Default)]
pub struct TestCapture {
    entries: Arc<Mutex<Vec<CapturedEntry>>>,
}

impl TestCapture {
    /// A capture sink and the handle reading from it
    pub fn new() -> (Sink, TestCapture) {
        let capture = TestCapture::default();
        (Sink::capture(capture.entries.clone()), capture)
    }

    /// All captured entries, oldest first
    pub fn entries(&self) -> Vec<CapturedEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Assert that an entry with the given message was captured
    ///
    /// # Panics
    ///
    /// Panics if no such entry exists
    pub fn assert_entry_exists(&self, message: &str) {
        let entries = self.entries();
        let found = entries.iter().any(|e| e.message == message);
        assert!(
            found,
            "Expected entry {:?} not found in {} captured entries",
            message,
            entries.len()
        );
    }

    /// Count entries matching a predicate
    pub fn count_entries<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEntry) -> bool,
    {
        self.entries().iter().filter(|e| predicate(e)).count()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// A logger writing into a fresh capture
///
/// Paths in `options` are ignored, failures the logger reports about
/// itself are discarded, and no bridges are installed.
pub fn capture_logger(options: &Options) -> (Logger, TestCapture) {
    let (sink, capture) = TestCapture::new();
    let built = Logger::builder(options)
        .output(sink)
        .error_output(Sink::writer("discard", io::sink()))
        .install_bridges(false)
        .build();
    match built {
        Ok(logger) => (logger, capture),
        Err(err) => panic!("capture logger rejected its options: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv;

    #[test]
    fn test_captures_structured_fields() {
        let (logger, capture) = capture_logger(&Options::default());
        logger
            .named("svc")
            .with(&[Field::new("attached", 1)])
            .infow("hello", kv!["k", "v"]);

        let entries = capture.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].logger.as_deref(), Some("svc"));
        assert_eq!(entries[0].fields[0].key(), "attached");
        assert_eq!(entries[0].field("k"), Some(&Value::from("v")));
    }

    #[test]
    fn test_clear() {
        let (logger, capture) = capture_logger(&Options::default());
        logger.info("one", &[]);
        capture.clear();
        assert!(capture.entries().is_empty());
    }

    #[test]
    fn test_count_entries() {
        let (logger, capture) = capture_logger(&Options::default().with_level("debug"));
        logger.debug("a", &[]);
        logger.warn("b", &[]);
        logger.warn("c", &[]);
        assert_eq!(capture.count_entries(|e| e.severity == Severity::WARN), 2);
    }
}
