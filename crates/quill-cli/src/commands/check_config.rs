//! Check-config command
//!
//! Usage: quill check-config <PATH>

use clap::Args;
use quill_logging::Options;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckConfigArgs {
    /// TOML options file
    pub path: PathBuf,
}

/// Execute check-config command
pub fn execute(args: CheckConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = Options::load(&args.path)?;

    println!("✓ {} is valid", args.path.display());
    println!("  level:   {}", options.level);
    println!("  format:  {}", options.format);
    println!("  outputs: {}", options.output_paths.join(", "));
    println!("  errors:  {}", options.error_output_paths.join(", "));
    Ok(())
}
