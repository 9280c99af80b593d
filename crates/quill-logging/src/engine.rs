//! The structured-logging engine behind [`Logger`](crate::Logger)
//!
//! The facade only relies on a narrow contract: an enabled-check per
//! severity, writing one entry (severity, message, fields), and flushing.
//! Everything else (line encoding, sinks, sampling, caller and stacktrace
//! capture) lives here.

mod encoder;
mod sampler;
mod sink;

pub use sink::Sink;

use crate::field::Field;
use crate::logger::ExitHook;
use crate::options::Options;
use crate::severity::Severity;
use chrono::{DateTime, Local};
use encoder::Encoder;
use quill_core_types::schema::TIMESTAMP_FORMAT;
use quill_errors::{LogError, Result, SinkFailure};
use sampler::Sampler;
use std::backtrace::Backtrace;
use std::panic::Location;
use std::sync::atomic::{AtomicI8, Ordering};
use std::sync::Arc;

/// Source location of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    file: &'static str,
    line: u32,
}

impl Caller {
    /// Location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    pub(crate) fn here() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }

    pub(crate) fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// `dir/file.rs:line`, keeping only the last two path segments
    pub fn short(&self) -> String {
        let mut cut = self.file.len();
        for _ in 0..2 {
            match self.file[..cut].rfind(|c: char| c == '/' || c == '\\') {
                Some(idx) => cut = idx,
                None => return format!("{}:{}", self.file, self.line),
            }
        }
        format!("{}:{}", &self.file[cut + 1..], self.line)
    }
}

/// One entry as seen by encoders and sinks
pub(crate) struct Record<'a> {
    pub time: DateTime<Local>,
    pub severity: Severity,
    pub logger: Option<&'a str>,
    pub caller: Option<Caller>,
    pub message: &'a str,
    /// Fields attached to the logger
    pub context: &'a [Field],
    /// Fields passed to this call
    pub fields: &'a [Field],
    pub stack: Option<String>,
}

impl Record<'_> {
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.context.iter().chain(self.fields)
    }
}

pub(crate) struct Core {
    level: AtomicI8,
    development: bool,
    add_caller: bool,
    stacktrace_at: Option<Severity>,
    encoder: Encoder,
    sampler: Option<Sampler>,
    outputs: Vec<Sink>,
    error_outputs: Vec<Sink>,
    exit_hook: Arc<dyn ExitHook>,
}

impl Core {
    pub fn new(
        options: &Options,
        outputs: Vec<Sink>,
        error_outputs: Vec<Sink>,
        exit_hook: Arc<dyn ExitHook>,
    ) -> Result<Self> {
        let level = options.severity()?;
        Ok(Self {
            level: AtomicI8::new(level.as_i8()),
            development: options.development,
            add_caller: !options.disable_caller,
            stacktrace_at: (!options.disable_stacktrace).then_some(Severity::PANIC),
            encoder: Encoder::new(options.format, options.enable_color),
            sampler: options.sampling.map(Sampler::new),
            outputs,
            error_outputs,
            exit_hook,
        })
    }

    pub fn level(&self) -> Severity {
        Severity::from_i8(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: Severity) {
        self.level.store(level.as_i8(), Ordering::Relaxed);
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.level()
    }

    pub fn development(&self) -> bool {
        self.development
    }

    pub fn exit(&self, code: i32) {
        self.exit_hook.exit(code);
    }

    /// Encode and write one entry to every output
    ///
    /// Does not check the level; callers do that before building fields.
    pub fn write(
        &self,
        severity: Severity,
        logger: Option<&str>,
        caller: Option<Caller>,
        message: &str,
        context: &[Field],
        fields: &[Field],
    ) {
        if let Some(sampler) = &self.sampler {
            if !sampler.allow(severity, message) {
                return;
            }
        }

        let stack = self
            .stacktrace_at
            .filter(|at| severity >= *at)
            .map(|_| Backtrace::force_capture().to_string());

        let record = Record {
            time: Local::now(),
            severity,
            logger,
            caller: caller.filter(|_| self.add_caller),
            message,
            context,
            fields,
            stack,
        };

        let line = match self.encoder.encode(&record) {
            Ok(line) => line,
            Err(err) => {
                self.report(&LogError::Encode(err).to_string());
                return;
            }
        };

        for sink in &self.outputs {
            if let Err(err) = sink.write_record(&line, &record) {
                self.report(&format!("write error on {}: {}", sink.name(), err));
            }
        }
    }

    /// Report the engine's own failures on the error outputs
    pub fn report(&self, message: &str) {
        let line = format!("{} {}\n", Local::now().format(TIMESTAMP_FORMAT), message);
        for sink in &self.error_outputs {
            // Nowhere left to report a failing error output.
            sink.write_raw(line.as_bytes()).ok();
        }
    }

    pub fn sync(&self) -> Result<()> {
        let failures: Vec<SinkFailure> = self
            .outputs
            .iter()
            .chain(&self.error_outputs)
            .filter_map(|sink| {
                sink.sync().err().map(|source| SinkFailure {
                    sink: sink.name().to_string(),
                    source,
                })
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LogError::Flush { failures })
        }
    }
}
