//! Forwarding of foreign log records into a [`Logger`]
//!
//! - `log` crate macros: [`redirect_log`] (done by [`Logger::new`]) points a
//!   process-wide `log::Log` at the most recently built logger.
//! - `tracing` events: [`ForwardLayer`] is a subscriber layer that turns
//!   events into entries; [`install_tracing`] makes it the global default.
//!
//! Forwarded entries carry the record's target in a `target` field.

use crate::engine::Caller;
use crate::field::{Field, Value};
use crate::logger::Logger;
use crate::severity::Severity;
use arc_swap::ArcSwapOption;
use quill_core_types::schema::FIELD_TARGET;
use quill_errors::{LogError, Result};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::field::Visit;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

static LOG_TARGET: ArcSwapOption<Logger> = ArcSwapOption::const_empty();
static LOG_INSTALLED: OnceLock<bool> = OnceLock::new();
static LOG_FORWARDER: LogForwarder = LogForwarder;

struct LogForwarder;

impl log::Log for LogForwarder {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        let current = LOG_TARGET.load();
        match &*current {
            Some(logger) => logger.enabled(Severity::from_log_level(metadata.level())),
            None => false,
        }
    }

    fn log(&self, record: &log::Record<'_>) {
        let current = LOG_TARGET.load();
        let Some(logger) = &*current else {
            return;
        };
        let severity = Severity::from_log_level(record.level());
        if !logger.enabled(severity) {
            return;
        }

        let caller = match (record.file_static(), record.line()) {
            (Some(file), Some(line)) => Some(Caller::new(file, line)),
            _ => None,
        };
        let message = match record.args().as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(record.args().to_string()),
        };
        logger.log(
            severity,
            caller,
            &message,
            &[Field::new(FIELD_TARGET, record.target())],
        );
    }

    fn flush(&self) {
        if let Some(logger) = &*LOG_TARGET.load() {
            // log::Log::flush has no error channel.
            logger.flush().ok();
        }
    }
}

/// Send `log` crate records to `logger` from now on
///
/// The forwarder is registered with `log` once per process. If another
/// `log` implementation got there first, a warning is logged on `logger`
/// and records keep going to that implementation.
pub fn redirect_log(logger: &Logger) {
    LOG_TARGET.store(Some(Arc::new(logger.clone())));

    let installed = *LOG_INSTALLED.get_or_init(|| match log::set_logger(&LOG_FORWARDER) {
        Ok(()) => {
            log::set_max_level(log::LevelFilter::Trace);
            true
        }
        Err(_) => false,
    });
    if !installed {
        logger.warn(
            "log records are not redirected: another logger is already installed",
            &[],
        );
    }
}

/// Whether `log` crate records currently reach a facade logger
pub fn log_redirected() -> bool {
    LOG_INSTALLED.get().copied().unwrap_or(false) && LOG_TARGET.load().is_some()
}

/// A `tracing` layer that logs every event on a [`Logger`]
///
/// The event's `message` field becomes the entry message; other fields
/// keep their names and types.
#[derive(Debug, Clone)]
pub struct ForwardLayer {
    logger: Logger,
}

impl ForwardLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl<S> Layer<S> for ForwardLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.logger.enabled(Severity::from_tracing_level(metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = Severity::from_tracing_level(metadata.level());
        if !self.logger.enabled(severity) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        visitor.fields.push(Field::new(FIELD_TARGET, metadata.target()));

        let caller = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => Some(Caller::new(file, line)),
            _ => None,
        };
        self.logger.log(
            severity,
            caller,
            visitor.message.as_deref().unwrap_or_default(),
            &visitor.fields,
        );
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn push(&mut self, field: &tracing::field::Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(Field::new(field.name(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        self.push(field, Value::debug(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.push(field, Value::from(value));
    }
}

/// Make a [`ForwardLayer`] on `logger` the global `tracing` subscriber
///
/// # Errors
///
/// Returns [`LogError::Redirect`] when a global subscriber is already set.
pub fn install_tracing(logger: &Logger) -> Result<()> {
    let subscriber = tracing_subscriber::registry().with(ForwardLayer::new(logger.clone()));
    tracing::subscriber::set_global_default(subscriber).map_err(|err| LogError::Redirect {
        facility: "tracing".to_string(),
        reason: err.to_string(),
    })
}
