//! Ordered, key-unique string map.

use serde::{Serialize, Serializer};

/// An ordered `String -> String` map.
///
/// Keys keep the position of their first insertion; re-inserting a key
/// overwrites the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag {
    entries: Vec<(String, String)>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert a pair, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Layer `other` on top of this bag: colliding keys take `other`'s value.
    pub fn merge(&mut self, other: &PropertyBag) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = PropertyBag::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}

impl<K, V> Extend<(K, V)> for PropertyBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for PropertyBag {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for PropertyBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut bag = PropertyBag::new();
        bag.insert("a", "1");
        bag.insert("b", "2");
        assert_eq!(bag.insert("a", "3"), Some("1".to_string()));

        let keys: Vec<_> = bag.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(bag.get("a"), Some("3"));
    }

    #[test]
    fn test_merge_prefers_later_layer() {
        let mut declared: PropertyBag = [("user", "declared"), ("pool", "5")].into_iter().collect();
        let external: PropertyBag = [("user", "external"), ("url", "db://x")].into_iter().collect();
        declared.merge(&external);

        assert_eq!(declared.get("user"), Some("external"));
        assert_eq!(declared.get("pool"), Some("5"));
        assert_eq!(declared.get("url"), Some("db://x"));
        assert_eq!(declared.len(), 3);
    }

    #[test]
    fn test_serializes_as_map() {
        let bag: PropertyBag = [("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }
}
