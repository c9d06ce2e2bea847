//! Ordered, single-valued header map

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Header name -> value, in insertion order.
///
/// Holds at most one value per name: setting a name that is already present
/// (compared ASCII case-insensitively) replaces the earlier value in place,
/// so a header repeated in source text ends up with its last value. Names keep
/// the spelling they were last set with.
///
/// Names differing only in case are one header here, unlike a plain
/// case-sensitive map where `X-A` and `x-a` would be two entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderStore {
    entries: IndexMap<String, String>,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .keys()
            .position(|key| key.eq_ignore_ascii_case(name))
    }

    /// Set `name` to `value`, overwriting any existing value for that name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => {
                // Replace key and value without moving the entry
                self.entries.shift_remove_index(index);
                self.entries.shift_insert(index, name, value);
            }
            None => {
                self.entries.insert(name, value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .and_then(|index| self.entries.get_index(index))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove `name`, returning its value. Remaining entries keep their order.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.position(name)?;
        self.entries.shift_remove_index(index).map(|(_, value)| value)
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
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = HeaderStore::new();
        for (name, value) in iter {
            store.set(name, value);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value_wins() {
        let mut headers = HeaderStore::new();
        headers.set("Accept", "text/html");
        headers.set("Host", "a.example");
        headers.set("Accept", "*/*");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Accept"), Some("*/*"));
        // Position of the first occurrence is kept
        assert_eq!(headers.iter().next(), Some(("Accept", "*/*")));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut headers = HeaderStore::new();
        headers.set("content-type", "application/json");
        assert!(headers.contains("Content-Type"));
        headers.set("Content-Type", "text/plain");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.iter().next(), Some(("Content-Type", "text/plain")));
    }

    #[test]
    fn test_case_variants_merge_into_one_entry() {
        let headers: HeaderStore = [("X-A", "1"), ("x-a", "2")].into_iter().collect();
        assert_eq!(headers.iter().collect::<Vec<_>>(), [("x-a", "2")]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut headers: HeaderStore =
            [("A", "1"), ("B", "2"), ("C", "3")].into_iter().collect();
        assert_eq!(headers.remove("b"), Some("2".to_string()));
        assert_eq!(headers.remove("b"), None);
        let names: Vec<_> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["A", "C"]);
    }
}
