use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use storage::Comments;

/// Values keyed by `YYYY-MM-DD`, iterated newest date first.
///
/// Lexical order on the date string is chronological order, so the map
/// stores keys ascending and every accessor walks it in reverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMap<V> {
    inner: BTreeMap<String, V>,
}

impl<V> Default for DateMap<V> {
    fn default() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }
}

impl<V> DateMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, date: &str) -> Option<&V> {
        self.inner.get(date)
    }

    pub fn insert(&mut self, date: String, value: V) -> Option<V> {
        self.inner.insert(date, value)
    }

    pub fn entry_or_default(&mut self, date: String) -> &mut V
    where
        V: Default,
    {
        self.inner.entry(date).or_default()
    }

    /// Date keys, newest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().rev().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.inner.iter().rev().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.inner.values().rev()
    }
}

impl<V> FromIterator<(String, V)> for DateMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<V> IntoIterator for DateMap<V> {
    type Item = (String, V);
    type IntoIter = std::iter::Rev<std::collections::btree_map::IntoIter<String, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter().rev()
    }
}

// Serialized as a JSON object whose keys keep the newest-first order.
impl<V: Serialize> Serialize for DateMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (date, value) in self.iter() {
            map.serialize_entry(date, value)?;
        }
        map.end()
    }
}

/// Filenames seen for each modification date.
pub type PhotosByDate = DateMap<Vec<String>>;

/// One rendered day: its files plus the ISO week the day falls in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DayUnit {
    pub files: Vec<String>,
    pub week: u32,
}

/// Everything the page renderer needs.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GalleryView {
    pub photos: DateMap<DayUnit>,
    pub comments: Comments,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_newest_first() {
        let map: DateMap<u8> = [
            ("2024-05-01".to_string(), 1),
            ("2024-06-01".to_string(), 2),
            ("2023-12-31".to_string(), 3),
        ]
        .into_iter()
        .collect();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["2024-06-01", "2024-05-01", "2023-12-31"]);
    }

    #[test]
    fn serializes_in_descending_key_order() {
        let mut map = DateMap::new();
        map.insert("2024-01-02".to_string(), vec!["a.jpg".to_string()]);
        map.insert("2024-03-04".to_string(), vec!["b.png".to_string()]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2024-03-04":["b.png"],"2024-01-02":["a.jpg"]}"#);
    }
}
