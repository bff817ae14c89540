use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::ops::Index;

use super::record::Record;

/// The parse result: the header plus one `Record` per data line, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Records {
    header: Vec<String>,
    rows: Vec<Record>,
}

impl Records {
    pub(crate) fn new(header: Vec<String>, rows: Vec<Record>) -> Self {
        Self { header, rows }
    }

    /// Field names from the first input line.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }

    /// `name` projected across every record. `None` if `name` is not a header
    /// field; records too short to carry it contribute `None`.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        if !self.header.iter().any(|h| h == name) {
            return None;
        }
        Some(self.rows.iter().map(|r| r.get(name)).collect())
    }

    /// Value of `name` in record `index`.
    pub fn cell(&self, index: usize, name: &str) -> Option<&str> {
        self.rows.get(index).and_then(|r| r.get(name))
    }
}

impl Index<usize> for Records {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.rows[index]
    }
}

impl<'a> IntoIterator for &'a Records {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for Records {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl Serialize for Records {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}
