//! Output destinations
//!
//! Every write is a single `write_all` of one encoded entry under the
//! sink's own lock, so entries from concurrent callers never interleave.

use super::Record;
use crate::test_capture::CapturedEntry;
use quill_core_types::schema::{PATH_STDERR, PATH_STDOUT};
use quill_errors::{LogError, Result};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

enum Target {
    Stdout,
    Stderr,
    File(Mutex<File>),
    Writer(Mutex<Box<dyn Write + Send>>),
    Capture(Arc<Mutex<Vec<CapturedEntry>>>),
}

/// A destination for encoded log lines
pub struct Sink {
    name: String,
    target: Target,
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("name", &self.name).finish()
    }
}

impl Sink {
    pub fn stdout() -> Self {
        Self {
            name: PATH_STDOUT.to_string(),
            target: Target::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            name: PATH_STDERR.to_string(),
            target: Target::Stderr,
        }
    }

    /// Open a file for appending, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns [`LogError::SinkOpen`] when the file cannot be opened.
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::SinkOpen {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self {
            name: path.display().to_string(),
            target: Target::File(Mutex::new(file)),
        })
    }

    /// Resolve a configured path: `stdout`, `stderr`, or a file
    ///
    /// # Errors
    ///
    /// Returns [`LogError::SinkOpen`] when a file path cannot be opened.
    pub fn open(path: &str) -> Result<Self> {
        match path {
            PATH_STDOUT => Ok(Self::stdout()),
            PATH_STDERR => Ok(Self::stderr()),
            other => Self::file(other),
        }
    }

    /// Wrap an arbitrary writer
    pub fn writer(name: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            name: name.into(),
            target: Target::Writer(Mutex::new(Box::new(writer))),
        }
    }

    pub(crate) fn capture(entries: Arc<Mutex<Vec<CapturedEntry>>>) -> Self {
        Self {
            name: "capture".to_string(),
            target: Target::Capture(entries),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn write_record(&self, line: &[u8], record: &Record<'_>) -> io::Result<()> {
        match &self.target {
            Target::Capture(entries) => {
                entries
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(CapturedEntry::from_record(record));
                Ok(())
            }
            _ => self.write_raw(line),
        }
    }

    pub(crate) fn write_raw(&self, bytes: &[u8]) -> io::Result<()> {
        match &self.target {
            Target::Stdout => io::stdout().lock().write_all(bytes),
            Target::Stderr => io::stderr().lock().write_all(bytes),
            Target::File(file) => file
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .write_all(bytes),
            Target::Writer(writer) => writer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .write_all(bytes),
            Target::Capture(_) => Ok(()),
        }
    }

    /// Flush buffered output; files are also synced to disk
    pub(crate) fn sync(&self) -> io::Result<()> {
        match &self.target {
            Target::Stdout => io::stdout().flush(),
            Target::Stderr => io::stderr().flush(),
            Target::File(file) => {
                let mut file = file.lock().unwrap_or_else(PoisonError::into_inner);
                file.flush()?;
                file.sync_data()
            }
            Target::Writer(writer) => writer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .flush(),
            Target::Capture(_) => Ok(()),
        }
    }
}
