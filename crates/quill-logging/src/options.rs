//! Logger configuration
//!
//! [`Options`] is the only input a logger is built from. Level names stay
//! strings here so that configuration files and flags can carry them
//! verbatim; they are parsed into [`Severity`] when the logger is built.

use crate::severity::Severity;
use quill_core_types::schema::{PATH_STDERR, PATH_STDOUT};
use quill_errors::{LogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Line encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Console,
}

impl FromStr for Format {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "console" => Ok(Format::Console),
            _ => Err(LogError::InvalidFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("json"),
            Format::Console => f.write_str("console"),
        }
    }
}

/// Per-message sampling within a one-second tick
///
/// The first `initial` entries with the same severity and message pass,
/// after that only every `thereafter`-th one. `thereafter = 0` drops
/// everything past `initial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sampling {
    pub initial: u64,
    pub thereafter: u64,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            initial: 100,
            thereafter: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Minimum severity name (`debug`, `info`, `warn`, `error`, `dpanic`, `panic`, `fatal`)
    #[serde(alias = "lvl")]
    pub level: String,
    /// Development mode: dpanic-level entries panic
    #[serde(alias = "develop")]
    pub development: bool,
    #[serde(alias = "fmt")]
    pub format: Format,
    pub disable_caller: bool,
    pub disable_stacktrace: bool,
    /// Colored level names; only honoured by the console format
    pub enable_color: bool,
    /// Root logger name; empty for none
    pub name: String,
    /// `stdout`, `stderr` or file paths
    #[serde(alias = "paths")]
    pub output_paths: Vec<String>,
    /// Where the logger reports its own failures
    #[serde(alias = "errpaths")]
    pub error_output_paths: Vec<String>,
    /// `None` disables sampling
    pub sampling: Option<Sampling>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            development: false,
            format: Format::Json,
            disable_caller: false,
            disable_stacktrace: false,
            enable_color: true,
            name: String::new(),
            output_paths: vec![PATH_STDOUT.to_string()],
            error_output_paths: vec![PATH_STDERR.to_string()],
            sampling: Some(Sampling::default()),
        }
    }
}

impl Options {
    /// Parse options from a TOML document; absent keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Parse`] on malformed TOML or unknown value types,
    /// and any error [`Options::validate`] reports.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let options: Options = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Read and parse a TOML options file
    ///
    /// # Errors
    ///
    /// Returns [`LogError::ReadOptions`] when the file cannot be read, and
    /// otherwise behaves like [`Options::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LogError::ReadOptions {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check the options without opening any sink
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidLevel`] for an unknown level name and
    /// [`LogError::InvalidOptions`] when no output path is configured.
    pub fn validate(&self) -> Result<()> {
        self.severity()?;
        if self.output_paths.is_empty() {
            return Err(LogError::InvalidOptions {
                reason: "at least one output path is required".to_string(),
            });
        }
        Ok(())
    }

    /// The configured threshold as a typed severity
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidLevel`] when `level` is not a known name.
    pub fn severity(&self) -> Result<Severity> {
        self.level.parse()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_disable_caller(mut self, disable: bool) -> Self {
        self.disable_caller = disable;
        self
    }

    pub fn with_disable_stacktrace(mut self, disable: bool) -> Self {
        self.disable_stacktrace = disable;
        self
    }

    pub fn with_enable_color(mut self, enable: bool) -> Self {
        self.enable_color = enable;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_output_paths(mut self, paths: Vec<String>) -> Self {
        self.output_paths = paths;
        self
    }

    pub fn with_error_output_paths(mut self, paths: Vec<String>) -> Self {
        self.error_output_paths = paths;
        self
    }

    pub fn with_sampling(mut self, sampling: Option<Sampling>) -> Self {
        self.sampling = sampling;
        self
    }
}
