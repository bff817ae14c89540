//! Line providers: read a handle fully, close it, hand back its lines.
pub mod archive;

use regex::Regex;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};
use tracing::{debug, info};

use crate::{
    config::{ParseOptions, SourceConfig},
    error::{Error, Result},
    parse::{parse_with, Records},
};

/// An ordered sequence of text lines, owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLines {
    /// Where the lines came from, if known.
    pub name: Option<String>,
    pub lines: Vec<String>,
}

impl TextLines {
    pub fn new(lines: Vec<String>) -> Self {
        Self { name: None, lines }
    }

    pub fn named(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            lines,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn parse(&self, opts: &ParseOptions) -> Result<Records> {
        parse_with(&self.lines, opts)
    }
}

/// Fail with `Error::InvalidInput` unless `name` matches the configured pattern.
pub fn check_name(name: &str, cfg: &SourceConfig) -> Result<()> {
    let re = cfg.name_regex()?;
    check_name_with(name, &re)
}

pub(crate) fn check_name_with(name: &str, re: &Regex) -> Result<()> {
    if re.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidInput {
            name: name.to_string(),
            pattern: re.as_str().to_string(),
        })
    }
}

/// Read every line from `reader`, then drop it. Line terminators
/// (`\n` or `\r\n`) are stripped.
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<String>> {
    let reader = BufReader::new(reader);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Check the file name, then read the whole file. The handle is closed
/// before this returns.
#[tracing::instrument(level = "info", skip(path, cfg), fields(path = %path.as_ref().display()))]
pub fn open_lines<P: AsRef<Path>>(path: P, cfg: &SourceConfig) -> Result<TextLines> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    check_name(&name, cfg)?;

    let file = File::open(path)?;
    let lines = read_lines(file)?;
    debug!(lines = lines.len(), "read file");
    info!(name = %name, "loaded");

    Ok(TextLines::named(path.display().to_string(), lines))
}
