use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::Index;

/// One parsed data line: field name → value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Build a record from `(name, value)` pairs. A repeated name keeps its
    /// first position and takes the later value.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Record::default();
        for (k, v) in pairs {
            record.insert(k.into(), v.into());
        }
        record
    }

    fn insert(&mut self, key: String, value: String) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Index<&str> for Record {
    type Output = str;

    /// Panics if `key` is not present, like `HashMap`'s `Index`.
    fn index(&self, key: &str) -> &str {
        self.get(key)
            .unwrap_or_else(|| panic!("record has no field {:?}", key))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let r = Record::from_pairs([("b", "1"), ("a", "2"), ("c", "3")]);
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(r.values().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(&r["a"], "2");
    }

    #[test]
    fn repeated_key_takes_later_value() {
        let r = Record::from_pairs([("id", "1"), ("name", "x"), ("id", "2")]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.get("id"), Some("2"));
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn missing_key() {
        let r = Record::from_pairs([("id", "1")]);
        assert_eq!(r.get("name"), None);
        assert!(!r.contains_key("name"));
    }

    #[test]
    #[should_panic(expected = "no field")]
    fn index_panics_on_missing_key() {
        let r = Record::default();
        let _ = &r["id"];
    }

    #[test]
    fn serializes_as_ordered_map() -> anyhow::Result<()> {
        let r = Record::from_pairs([("z", "1"), ("a", "2")]);
        assert_eq!(serde_json::to_string(&r)?, r#"{"z":"1","a":"2"}"#);
        Ok(())
    }
}
