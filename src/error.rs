//! Error type shared by the parser, the line providers and the renderers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The source name does not match the expected tabular-text pattern.
    #[error("invalid input {name:?}: name does not match {pattern}")]
    InvalidInput { name: String, pattern: String },

    /// A line produced no fields (0-based line index).
    #[error("malformed input: line {line} has no fields")]
    MalformedInput { line: usize },

    #[error("separator must not be empty")]
    EmptySeparator,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
