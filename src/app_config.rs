use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::bibliography::{DEFAULT_ENTRY_SEPARATOR, DEFAULT_ENVIRONMENT_ARGUMENT};

/// Application configuration module
/// This module handles the application configuration including loading and
/// validating configuration settings. A configuration file is optional;
/// without one the built-in defaults are used.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Bibliography to read
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,

    /// Destination of the sorted bibliography
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Argument of `\begin{thebibliography}{..}`
    #[serde(default = "default_environment_argument")]
    pub environment_argument: String,

    /// Text placed between sorted entries
    #[serde(default = "default_entry_separator")]
    pub entry_separator: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Equivalent filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_input_file() -> PathBuf {
    PathBuf::from("bib.txt")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("sorted_bib.txt")
}

fn default_environment_argument() -> String {
    DEFAULT_ENVIRONMENT_ARGUMENT.to_string()
}

fn default_entry_separator() -> String {
    DEFAULT_ENTRY_SEPARATOR.to_string()
}

impl Config {
    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            return Err(anyhow!("Input file name must not be empty"));
        }

        if self.output_file.as_os_str().is_empty() {
            return Err(anyhow!("Output file name must not be empty"));
        }

        if self.input_file == self.output_file {
            return Err(anyhow!(
                "Output file must differ from input file: {}",
                self.input_file.display()
            ));
        }

        let argument = self.environment_argument.trim();
        if argument.is_empty() || argument.contains(['{', '}']) {
            return Err(anyhow!(
                "Invalid thebibliography argument: '{}'",
                self.environment_argument
            ));
        }

        // Entries must remain separable when the output is sorted again
        if self.entry_separator.is_empty() || !self.entry_separator.chars().all(char::is_whitespace) {
            return Err(anyhow!("Entry separator must be non-empty whitespace"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_file: default_input_file(),
            output_file: default_output_file(),
            environment_argument: default_environment_argument(),
            entry_separator: default_entry_separator(),
            log_level: LogLevel::default(),
        }
    }
}
