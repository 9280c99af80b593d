//! Logger flags shared by every subcommand
//!
//! Flags override the options file given with `--log.config`, which in
//! turn overrides the defaults.

use clap::Args;
use quill_logging::{Format, Options};
use std::path::PathBuf;

#[derive(Debug, Default, Args)]
pub struct LogArgs {
    /// Minimum severity (debug, info, warn, error, dpanic, panic, fatal)
    #[arg(long = "log.lvl", global = true)]
    pub level: Option<String>,

    /// Development mode: dpanic entries panic
    #[arg(long = "log.develop", global = true, num_args = 0..=1, default_missing_value = "true")]
    pub development: Option<bool>,

    /// Line format (json or console)
    #[arg(long = "log.fmt", global = true)]
    pub format: Option<String>,

    #[arg(
        long = "log.disableCaller",
        global = true,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub disable_caller: Option<bool>,

    #[arg(
        long = "log.disableStacktrace",
        global = true,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub disable_stacktrace: Option<bool>,

    /// Colored level names (console format only)
    #[arg(
        long = "log.enableColor",
        global = true,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub enable_color: Option<bool>,

    /// Root logger name
    #[arg(long = "log.name", global = true)]
    pub name: Option<String>,

    /// Output paths, comma separated (stdout, stderr or files)
    #[arg(long = "log.paths", global = true, value_delimiter = ',')]
    pub output_paths: Option<Vec<String>>,

    /// Paths for the logger's own errors, comma separated
    #[arg(long = "log.errpaths", global = true, value_delimiter = ',')]
    pub error_output_paths: Option<Vec<String>>,

    /// TOML options file
    #[arg(long = "log.config", global = true)]
    pub config: Option<PathBuf>,
}

impl LogArgs {
    /// Resolve flags into logger options
    pub fn options(&self) -> Result<Options, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };

        if let Some(level) = &self.level {
            options.level = level.clone();
        }
        if let Some(development) = self.development {
            options.development = development;
        }
        if let Some(format) = &self.format {
            options.format = format.parse::<Format>()?;
        }
        if let Some(disable) = self.disable_caller {
            options.disable_caller = disable;
        }
        if let Some(disable) = self.disable_stacktrace {
            options.disable_stacktrace = disable;
        }
        if let Some(enable) = self.enable_color {
            options.enable_color = enable;
        }
        if let Some(name) = &self.name {
            options.name = name.clone();
        }
        if let Some(paths) = &self.output_paths {
            options.output_paths = paths.clone();
        }
        if let Some(paths) = &self.error_output_paths {
            options.error_output_paths = paths.clone();
        }

        options.validate()?;
        Ok(options)
    }
}
