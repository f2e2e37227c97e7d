// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ordered dynamic object with a per-instance key case policy.

use crate::value::Value;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;

/// Insertion-ordered key/value object.
///
/// Keys are matched under the object's case policy; the spelling used on
/// first insertion is kept.
#[derive(Clone, Default)]
pub struct DynamicObject {
    entries: IndexMap<String, (String, Value)>,
    case_sensitive: bool,
}

impl DynamicObject {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            entries: IndexMap::new(),
            case_sensitive,
        }
    }

    pub fn with_capacity(capacity: usize, case_sensitive: bool) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            case_sensitive,
        }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn fold<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(key.to_lowercase())
        }
    }

    /// Insert or replace. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        let folded = self.fold(&key).into_owned();
        match self.entries.get_mut(&folded) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.insert(folded, (key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(self.fold(key).as_ref()).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let folded = self.fold(key).into_owned();
        self.entries.get_mut(&folded).map(|(_, v)| v)
    }

    /// Remove a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let folded = self.fold(key).into_owned();
        self.entries.shift_remove(&folded).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(self.fold(key).as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.values().map(|(k, v)| (k.as_str(), v))
    }

    /// Entry at a position in insertion order.
    pub fn get_index(&self, index: usize) -> Option<(&str, &Value)> {
        self.entries
            .get_index(index)
            .map(|(_, (k, v))| (k.as_str(), v))
    }
}

impl IntoIterator for DynamicObject {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoValues<String, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl FromIterator<(String, Value)> for DynamicObject {
    /// Collects into a case-insensitive object.
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut object = Self::new(false);
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl fmt::Debug for DynamicObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup_keeps_first_spelling() {
        let mut obj = DynamicObject::new(false);
        obj.insert("StringProp", Value::from("a"));
        assert_eq!(obj.insert("STRINGPROP", Value::from("b")), Some(Value::from("a")));
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("stringprop"), Some(&Value::from("b")));
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["StringProp"]);
    }

    #[test]
    fn test_case_sensitive_keys_are_distinct() {
        let mut obj = DynamicObject::new(true);
        obj.insert("a", Value::I32(1));
        obj.insert("A", Value::I32(2));
        assert_eq!(obj.len(), 2);
        assert!(!obj.contains_key("b"));
        assert_eq!(obj.get("A"), Some(&Value::I32(2)));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut obj: DynamicObject = [("a", 1), ("b", 2), ("c", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::I32(v)))
            .collect();
        assert_eq!(obj.remove("B"), Some(Value::I32(2)));
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(obj.get_index(1), Some(("c", &Value::I32(3))));
    }
}
