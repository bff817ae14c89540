// src/parse/mod.rs
pub mod record;
pub mod records;

pub use record::Record;
pub use records::Records;

use tracing::{debug, trace};

use crate::{
    config::{EmptyLinePolicy, ParseOptions},
    error::{Error, Result},
};

/// Parse `lines` with the given separator and default options.
pub fn parse<S: AsRef<str>>(lines: &[S], separator: &str) -> Result<Records> {
    parse_with(lines, &ParseOptions::with_separator(separator))
}

/// Line 0 is the header; every later line becomes one `Record`, pairing
/// header[i] with value[i] up to the shorter of the two.
///
/// An empty input gives an empty result. A zero-length line yields no fields:
/// an empty record under `EmptyLinePolicy::Keep`, `Error::MalformedInput`
/// under `EmptyLinePolicy::Reject`. This is the one case where a record's keys
/// are not the header truncated to `line.split(separator).count()`: a literal
/// split of `""` gives one empty field, but the record carries none.
#[tracing::instrument(level = "debug", skip(lines, opts), fields(line_count = lines.len(), separator = %opts.separator))]
pub fn parse_with<S: AsRef<str>>(lines: &[S], opts: &ParseOptions) -> Result<Records> {
    if opts.separator.is_empty() {
        return Err(Error::EmptySeparator);
    }

    let Some((head, tail)) = lines.split_first() else {
        debug!("no lines; empty result");
        return Ok(Records::default());
    };

    let header: Vec<String> = fields_of(head.as_ref(), 0, opts)?
        .into_iter()
        .map(str::to_string)
        .collect();

    let rows = tail
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let idx = i + 1;
            let values = fields_of(line.as_ref(), idx, opts)?;
            if values.len() != header.len() {
                trace!(
                    line = idx,
                    fields = values.len(),
                    header = header.len(),
                    "field count differs from header"
                );
            }
            Ok(Record::from_pairs(
                header.iter().map(String::as_str).zip(values),
            ))
        })
        .collect::<Result<Vec<Record>>>()?;

    debug!(columns = header.len(), records = rows.len(), "parsed");
    Ok(Records::new(header, rows))
}

/// Split `line` on `separator` literally. A zero-length line has no fields.
pub fn split_fields<'a>(line: &'a str, separator: &str) -> Vec<&'a str> {
    if line.is_empty() {
        Vec::new()
    } else {
        line.split(separator).collect()
    }
}

fn fields_of<'a>(line: &'a str, idx: usize, opts: &ParseOptions) -> Result<Vec<&'a str>> {
    let fields = split_fields(line, &opts.separator);
    if fields.is_empty() && opts.empty_lines == EmptyLinePolicy::Reject {
        return Err(Error::MalformedInput { line: idx });
    }
    Ok(fields)
}
