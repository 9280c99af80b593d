//! Pipe command
//!
//! Usage: quill pipe [--tier <info|warning|error|fatal>]
//!
//! Each stdin line goes through the process-wide severity-routed facility,
//! which the logger has registered itself with.

use crate::log_args::LogArgs;
use clap::Args;
use quill_logging::{BridgeSeverity, Logger, SeverityLog};
use std::io::{self, BufRead};

#[derive(Debug, Args)]
pub struct PipeArgs {
    /// Severity tier for every line
    #[arg(short, long, default_value = "info")]
    pub tier: BridgeSeverity,
}

/// Execute pipe command
pub fn execute(log: &LogArgs, args: PipeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = log.options()?;
    let logger = Logger::new(&options);
    let facility = SeverityLog::global();

    for line in io::stdin().lock().lines() {
        facility.log(args.tier, &line?)?;
    }

    logger.flush()?;
    Ok(())
}
