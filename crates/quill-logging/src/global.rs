//! Process-wide default logger
//!
//! Passing a [`Logger`] explicitly is preferred. For code that cannot,
//! this module holds one global logger, built from default options on
//! first use. The lazy default leaves the severity bridge and the `log`
//! redirect with whichever logger already holds them; [`init`] and
//! [`try_init`] take them over. Replacement is serialized by a lock; reads are lock-free, so
//! a call racing a replacement logs through either the old or the new
//! logger.

use crate::context::{self, Carrier};
use crate::engine::Caller;
use crate::field::{Arg, Field};
use crate::logger::{built_or_exit, Logger};
use crate::options::Options;
use crate::severity::Severity;
use crate::verbosity::Verbose;
use arc_swap::ArcSwap;
use quill_errors::Result;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

static GLOBAL: OnceLock<ArcSwap<Logger>> = OnceLock::new();
static REPLACE: Mutex<()> = Mutex::new(());

fn slot() -> &'static ArcSwap<Logger> {
    GLOBAL.get_or_init(|| {
        let default = Logger::builder(&Options::default())
            .install_bridges(false)
            .build();
        ArcSwap::from_pointee(built_or_exit(default))
    })
}

/// The current global logger
pub fn logger() -> Logger {
    Logger::clone(&slot().load())
}

/// Install `logger` globally, returning the one it replaces
///
/// `None` when no global logger had been set or used yet.
pub fn replace(logger: Logger) -> Option<Arc<Logger>> {
    let _guard = REPLACE.lock().unwrap_or_else(PoisonError::into_inner);
    let fresh = Arc::new(logger);
    if let Some(current) = GLOBAL.get() {
        return Some(current.swap(fresh));
    }
    match GLOBAL.set(ArcSwap::new(fresh.clone())) {
        Ok(()) => None,
        // Lost to a lazy default built by a concurrent reader.
        Err(_) => Some(slot().swap(fresh)),
    }
}

/// Build a logger from `options` and install it, exiting on failure
pub fn init(options: &Options) {
    replace(Logger::new(options));
}

/// Build a logger from `options` and install it
///
/// # Errors
///
/// Returns the construction error; the global logger is left unchanged.
pub fn try_init(options: &Options) -> Result<()> {
    replace(Logger::try_new(options)?);
    Ok(())
}

/// Flush the global logger
///
/// # Errors
///
/// See [`Logger::flush`].
pub fn flush() -> Result<()> {
    slot().load().flush()
}

pub fn v(level: i32) -> Verbose {
    slot().load().v(level)
}

pub fn named(name: &str) -> Logger {
    slot().load().named(name)
}

pub fn with(fields: &[Field]) -> Logger {
    slot().load().with(fields)
}

#[track_caller]
pub fn with_fields<I>(kv: I) -> Logger
where
    I: IntoIterator<Item = Arg>,
{
    slot().load().with_fields(kv)
}

pub fn enabled(severity: Severity) -> bool {
    slot().load().enabled(severity)
}

/// Attach the global logger to `carrier`
pub fn attach(carrier: &Carrier) -> Carrier {
    context::attach(carrier, logger())
}

/// The carrier's logger, or the global one, with the carrier's ambient
/// identifiers attached
pub fn for_carrier(carrier: &Carrier) -> Logger {
    context::extract(carrier)
        .unwrap_or_else(logger)
        .for_carrier(carrier)
}

macro_rules! leveled {
    ($($severity:ident => $plain:ident, $formatted:ident, $sugared:ident;)*) => {
        $(
            #[track_caller]
            pub fn $plain(msg: &str, fields: &[Field]) {
                slot().load().log(Severity::$severity, Some(Caller::here()), msg, fields);
            }

            #[track_caller]
            pub fn $formatted(args: fmt::Arguments<'_>) {
                slot().load().log_formatted(Severity::$severity, Caller::here(), args);
            }

            #[track_caller]
            pub fn $sugared<I>(msg: &str, kv: I)
            where
                I: IntoIterator<Item = Arg>,
            {
                slot().load().log_sugared(Severity::$severity, Caller::here(), msg, kv);
            }
        )*
    };
}

leveled! {
    DEBUG => debug, debugf, debugw;
    INFO => info, infof, infow;
    WARN => warn, warnf, warnw;
    ERROR => error, errorf, errorw;
    DPANIC => dpanic, dpanicf, dpanicw;
    PANIC => panic, panicf, panicw;
    FATAL => fatal, fatalf, fatalw;
}
