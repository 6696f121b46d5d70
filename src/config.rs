//! Config - settings for loading and printing tables
//!
//! Values come from the environment (a `.env` file is honoured) and can be
//! overridden on the command line.

use crate::error::{DataTableError, Result};
use clap::ValueEnum;
use std::str::FromStr;

pub const DELIMITER_VAR: &str = "DATATABLE_DELIMITER";
pub const FORMAT_VAR: &str = "DATATABLE_FORMAT";
pub const MERGE_VAR: &str = "DATATABLE_MERGE";
pub const LOG_VAR: &str = "DATATABLE_LOG";

/// How a table is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = DataTableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(DataTableError::InvalidArgument(format!(
                "Unknown output format: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Field delimiter for CSV input and output
    pub delimiter: u8,

    pub format: OutputFormat,

    /// Load rows through `inc` (merging equal keys) instead of `add`
    pub merge: bool,

    /// Default log filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: b',',
            format: OutputFormat::Csv,
            merge: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(delimiter) = lookup(DELIMITER_VAR) {
            config.delimiter = parse_delimiter(&delimiter)?;
        }
        if let Some(format) = lookup(FORMAT_VAR) {
            config.format = format.parse()?;
        }
        if let Some(merge) = lookup(MERGE_VAR) {
            config.merge = parse_flag(MERGE_VAR, &merge)?;
        }
        if let Some(level) = lookup(LOG_VAR) {
            config.log_level = level;
        }

        Ok(config)
    }
}

pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ if s == "\\t" => Ok(b'\t'),
        _ => Err(DataTableError::InvalidArgument(format!(
            "Delimiter must be a single ASCII character, got '{}'",
            s
        ))),
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(DataTableError::InvalidArgument(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}
