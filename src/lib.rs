pub mod columnar;
pub mod config;
pub mod error;
pub mod parse;
pub mod render;
pub mod source;

pub use config::{Config, EmptyLinePolicy, OutputFormat, ParseOptions, SourceConfig};
pub use error::{Error, Result};
pub use parse::{parse, parse_with, Record, Records};
pub use source::TextLines;
