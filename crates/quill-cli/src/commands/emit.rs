//! Emit command
//!
//! Usage: quill emit --message <MSG> [--severity <NAME> | --verbosity <N>] [--field k=v]...

use crate::log_args::LogArgs;
use clap::Args;
use quill_logging::{Arg, Logger, Severity, Value};

#[derive(Debug, Args)]
pub struct EmitArgs {
    /// Entry message
    #[arg(short, long)]
    pub message: String,

    /// Severity name
    #[arg(short, long, default_value = "info", conflicts_with = "verbosity")]
    pub severity: String,

    /// Log at this verbosity instead of a named severity (negative clamps to 0)
    #[arg(short, long, allow_negative_numbers = true)]
    pub verbosity: Option<i32>,

    /// Field as key=value; values that parse as JSON keep their type
    #[arg(short, long = "field")]
    pub fields: Vec<String>,
}

/// Execute emit command
pub fn execute(log: &LogArgs, args: EmitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = log.options()?;
    let kv = parse_fields(&args.fields)?;
    let logger = Logger::new(&options);

    match args.verbosity {
        Some(level) => logger.v(level).infow(&args.message, kv),
        None => emit_at(&logger, args.severity.parse()?, &args.message, kv)?,
    }

    logger.flush()?;
    Ok(())
}

fn emit_at(
    logger: &Logger,
    severity: Severity,
    message: &str,
    kv: Vec<Arg>,
) -> Result<(), Box<dyn std::error::Error>> {
    match severity {
        Severity::DEBUG => logger.debugw(message, kv),
        Severity::INFO => logger.infow(message, kv),
        Severity::WARN => logger.warnw(message, kv),
        Severity::ERROR => logger.errorw(message, kv),
        Severity::DPANIC => logger.dpanicw(message, kv),
        Severity::PANIC => logger.panicw(message, kv),
        Severity::FATAL => logger.fatalw(message, kv),
        other => return Err(format!("no leveled method for severity {}", other).into()),
    }
    Ok(())
}

fn parse_fields(fields: &[String]) -> Result<Vec<Arg>, Box<dyn std::error::Error>> {
    let mut kv = Vec::with_capacity(fields.len() * 2);
    for field in fields {
        let (key, raw) = field
            .split_once('=')
            .ok_or_else(|| format!("field {:?} is not key=value", field))?;
        let value = serde_json::from_str::<serde_json::Value>(raw)
            .map(Value::Json)
            .unwrap_or_else(|_| Value::from(raw));
        kv.push(Arg::from(key));
        kv.push(Arg::from(value));
    }
    Ok(kv)
}
