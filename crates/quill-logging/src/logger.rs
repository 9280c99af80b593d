//! The logger facade
//!
//! A [`Logger`] is a cheap, cloneable handle on one engine core plus a
//! name and a set of attached fields. Derivations (`named`, `with`,
//! `with_fields`, `v`, `for_carrier`) return new handles sharing the core;
//! the receiver is never changed.
//!
//! Every severity comes in three forms:
//!
//! - `info(msg, &[Field])`: typed fields, forwarded as-is
//! - `infof(format_args!(..))`: formatted message, no fields
//! - `infow(msg, kv![..])`: untyped key-value pairs, checked at runtime

use crate::bridge::{self, SeverityLog};
use crate::engine::{Caller, Core, Sink};
use crate::field::{Arg, Field};
use crate::options::Options;
use crate::redirect;
use crate::sanitize::{sanitize, Sanitized};
use crate::severity::Severity;
use crate::verbosity::{to_severity, Verbose};
use quill_errors::Result;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// How the facade terminates the process after a fatal entry
///
/// Tests inject a hook that records the exit code instead of exiting.
pub trait ExitHook: Send + Sync {
    fn exit(&self, code: i32);
}

/// Exits the process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl ExitHook for ProcessExit {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}

#[derive(Clone)]
pub struct Logger {
    core: Arc<Core>,
    name: Option<Arc<str>>,
    fields: Arc<[Field]>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.core.level())
            .field("fields", &self.fields)
            .finish()
    }
}

/// Builds a [`Logger`] with explicit sinks or exit behavior
///
/// Sinks given here replace the paths named in the options.
pub struct LoggerBuilder {
    options: Options,
    outputs: Vec<Sink>,
    error_outputs: Vec<Sink>,
    exit_hook: Arc<dyn ExitHook>,
    install_bridges: bool,
}

impl LoggerBuilder {
    pub fn output(mut self, sink: Sink) -> Self {
        self.outputs.push(sink);
        self
    }

    pub fn error_output(mut self, sink: Sink) -> Self {
        self.error_outputs.push(sink);
        self
    }

    pub fn exit_hook(mut self, hook: impl ExitHook + 'static) -> Self {
        self.exit_hook = Arc::new(hook);
        self
    }

    /// Whether to take over the global [`SeverityLog`] and the `log` crate
    /// (default: true)
    pub fn install_bridges(mut self, install: bool) -> Self {
        self.install_bridges = install;
        self
    }

    /// # Errors
    ///
    /// Returns a configuration error for invalid options and
    /// [`LogError::SinkOpen`](quill_errors::LogError::SinkOpen) when a
    /// configured path cannot be opened.
    pub fn build(self) -> Result<Logger> {
        self.options.validate()?;

        let outputs = if self.outputs.is_empty() {
            open_all(&self.options.output_paths)?
        } else {
            self.outputs
        };
        let error_outputs = if self.error_outputs.is_empty() {
            open_all(&self.options.error_output_paths)?
        } else {
            self.error_outputs
        };

        let core = Core::new(&self.options, outputs, error_outputs, self.exit_hook)?;
        let logger = Logger {
            core: Arc::new(core),
            name: None,
            fields: Arc::from(Vec::<Field>::new()),
        }
        .named(&self.options.name);

        if self.install_bridges {
            bridge::install(SeverityLog::global(), &logger);
            redirect::redirect_log(&logger);
        }
        Ok(logger)
    }
}

/// Unwrap a build result, terminating the process on failure
pub(crate) fn built_or_exit(built: Result<Logger>) -> Logger {
    match built {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("failed to build logger: {}", err);
            std::process::exit(1);
        }
    }
}

fn open_all(paths: &[String]) -> Result<Vec<Sink>> {
    paths.iter().map(|path| Sink::open(path)).collect()
}

macro_rules! leveled {
    ($($(#[$doc:meta])* $severity:ident => $plain:ident, $formatted:ident, $sugared:ident;)*) => {
        $(
            $(#[$doc])*
            #[track_caller]
            pub fn $plain(&self, msg: &str, fields: &[Field]) {
                self.log(Severity::$severity, Some(Caller::here()), msg, fields);
            }

            #[track_caller]
            pub fn $formatted(&self, args: fmt::Arguments<'_>) {
                self.log_formatted(Severity::$severity, Caller::here(), args);
            }

            #[track_caller]
            pub fn $sugared<I>(&self, msg: &str, kv: I)
            where
                I: IntoIterator<Item = Arg>,
            {
                self.log_sugared(Severity::$severity, Caller::here(), msg, kv);
            }
        )*
    };
}

impl Logger {
    /// Build a logger, terminating the process if the options are unusable
    ///
    /// Also installs the severity bridge and the `log` redirect; see
    /// [`LoggerBuilder::install_bridges`].
    pub fn new(options: &Options) -> Logger {
        built_or_exit(Self::try_new(options))
    }

    /// Build a logger
    ///
    /// # Errors
    ///
    /// See [`LoggerBuilder::build`].
    pub fn try_new(options: &Options) -> Result<Logger> {
        Self::builder(options).build()
    }

    pub fn builder(options: &Options) -> LoggerBuilder {
        LoggerBuilder {
            options: options.clone(),
            outputs: Vec::new(),
            error_outputs: Vec::new(),
            exit_hook: Arc::new(ProcessExit),
            install_bridges: true,
        }
    }

    /// A child logger named `parent.name`
    pub fn named(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.clone();
        }
        let name = match &self.name {
            Some(parent) => format!("{}.{}", parent, name),
            None => name.to_string(),
        };
        Logger {
            name: Some(Arc::from(name)),
            ..self.clone()
        }
    }

    /// A child logger that adds `fields` to every entry
    pub fn with(&self, fields: &[Field]) -> Logger {
        if fields.is_empty() {
            return self.clone();
        }
        let mut all = Vec::with_capacity(self.fields.len() + fields.len());
        all.extend_from_slice(&self.fields);
        all.extend_from_slice(fields);
        Logger {
            fields: Arc::from(all),
            ..self.clone()
        }
    }

    /// Like [`Logger::with`], from an untyped key-value list
    ///
    /// Malformed input is reported at DPANIC; pairs before it are kept.
    #[track_caller]
    pub fn with_fields<I>(&self, kv: I) -> Logger
    where
        I: IntoIterator<Item = Arg>,
    {
        let fields = self.sanitize_reported(Caller::here(), kv);
        self.with(&fields)
    }

    /// A view logging at verbosity `level`
    pub fn v(&self, level: i32) -> Verbose {
        Verbose::new(self.clone(), to_severity(level))
    }

    /// Flush every output and error output
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Flush`](quill_errors::LogError::Flush) naming
    /// every sink that failed.
    pub fn flush(&self) -> Result<()> {
        self.core.sync()
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        self.core.enabled(severity)
    }

    pub fn level(&self) -> Severity {
        self.core.level()
    }

    /// Change the threshold of this logger and every logger sharing its core
    pub fn set_level(&self, level: Severity) {
        self.core.set_level(level);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn development(&self) -> bool {
        self.core.development()
    }

    /// Whether `a` and `b` share a core and the same attached fields
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.core, &b.core) && Arc::ptr_eq(&a.fields, &b.fields) && a.name == b.name
    }

    leveled! {
        DEBUG => debug, debugf, debugw;
        INFO => info, infof, infow;
        WARN => warn, warnf, warnw;
        ERROR => error, errorf, errorw;
        /// Logs, then panics in development mode
        DPANIC => dpanic, dpanicf, dpanicw;
        /// Logs, then panics with the message
        PANIC => panic, panicf, panicw;
        /// Logs, flushes, then exits with status 1
        FATAL => fatal, fatalf, fatalw;
    }

    /// Whether a call at `severity` has any effect
    fn has_effect(&self, severity: Severity) -> bool {
        severity >= Severity::DPANIC || self.core.enabled(severity)
    }

    pub(crate) fn log(
        &self,
        severity: Severity,
        caller: Option<Caller>,
        message: &str,
        fields: &[Field],
    ) {
        if self.core.enabled(severity) {
            self.core.write(
                severity,
                self.name.as_deref(),
                caller,
                message,
                &self.fields,
                fields,
            );
        }
        self.finish(severity, message);
    }

    pub(crate) fn log_formatted(
        &self,
        severity: Severity,
        caller: Caller,
        args: fmt::Arguments<'_>,
    ) {
        if !self.has_effect(severity) {
            return;
        }
        let message = match args.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(args.to_string()),
        };
        self.log(severity, Some(caller), &message, &[]);
    }

    pub(crate) fn log_sugared<I>(&self, severity: Severity, caller: Caller, message: &str, kv: I)
    where
        I: IntoIterator<Item = Arg>,
    {
        if !self.has_effect(severity) {
            return;
        }
        let fields = self.sanitize_reported(caller, kv);
        self.log(severity, Some(caller), message, &fields);
    }

    /// Sanitize `kv`, emitting a DPANIC entry if it was malformed
    fn sanitize_reported<I>(&self, caller: Caller, kv: I) -> Vec<Field>
    where
        I: IntoIterator<Item = Arg>,
    {
        let Sanitized { fields, error } = sanitize(kv, &[]);
        if let Some(error) = error {
            self.log(
                Severity::DPANIC,
                Some(caller),
                error.message(),
                &[error.to_field()],
            );
        }
        fields
    }

    fn finish(&self, severity: Severity, message: &str) {
        if severity >= Severity::FATAL {
            if let Err(err) = self.core.sync() {
                self.core.report(&err.to_string());
            }
            self.core.exit(1);
        } else if severity >= Severity::PANIC
            || (severity >= Severity::DPANIC && self.core.development())
        {
            panic!("{}", message);
        }
    }
}
