use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, str::FromStr};

use crate::error::{Error, Result};

pub const DEFAULT_SEPARATOR: &str = ",";
pub const DEFAULT_NAME_PATTERN: &str = r"(?i)\.csv$";

pub const ENV_SEPARATOR: &str = "TABTEXT_SEPARATOR";
pub const ENV_NAME_PATTERN: &str = "TABTEXT_NAME_PATTERN";

/// What to do with a line that is empty, i.e. yields no fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyLinePolicy {
    /// Produce an empty record (or an empty header for line 0).
    #[default]
    Keep,
    /// Fail with `Error::MalformedInput`.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Field delimiter, matched literally.
    pub separator: String,
    pub empty_lines: EmptyLinePolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            empty_lines: EmptyLinePolicy::Keep,
        }
    }
}

impl ParseOptions {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Regex a source name must match before its lines are read.
    pub name_pattern: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            name_pattern: DEFAULT_NAME_PATTERN.to_string(),
        }
    }
}

impl SourceConfig {
    pub fn name_regex(&self) -> Result<Regex> {
        Regex::new(&self.name_pattern)
            .map_err(|e| Error::config(format!("bad name pattern {:?}: {}", self.name_pattern, e)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(Error::config(format!("unknown output format {:?}", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// Top-level configuration, as read from a YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseOptions,
    pub source: SourceConfig,
    pub output: OutputFormat,
}

impl Config {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::config(format!("bad config: {}", e)))
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Apply `TABTEXT_*` overrides, looked up through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(sep) = lookup(ENV_SEPARATOR) {
            self.parse.separator = sep;
        }
        if let Some(pattern) = lookup(ENV_NAME_PATTERN) {
            self.source.name_pattern = pattern;
        }
        self
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }
}
