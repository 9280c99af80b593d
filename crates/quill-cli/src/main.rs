//! Quill CLI
//!
//! Emit entries, pipe text through the severity bridge, and check option
//! files from the command line.

use clap::{Parser, Subcommand};

mod commands;
mod log_args;

#[derive(Debug, Parser)]
#[command(name = "quill")]
#[command(about = "Quill - structured logging from the command line", long_about = None)]
struct Cli {
    #[command(flatten)]
    log: log_args::LogArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log one entry
    Emit(commands::emit::EmitArgs),
    /// Log each stdin line at a severity tier
    Pipe(commands::pipe::PipeArgs),
    /// Validate a TOML options file
    CheckConfig(commands::check_config::CheckConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Emit(args) => commands::emit::execute(&cli.log, args),
        Commands::Pipe(args) => commands::pipe::execute(&cli.log, args),
        Commands::CheckConfig(args) => commands::check_config::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
