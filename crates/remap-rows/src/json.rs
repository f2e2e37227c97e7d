// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Rows from a JSON array of objects.
//!
//! Columns are the union of the object keys in first-seen order; a key
//! missing from an object reads as null. Nested arrays become lists and
//! nested objects become dynamic objects.

use crate::error::{Result, RowError};
use crate::reader::{MemoryReader, RowReader};
use indexmap::IndexSet;
use remap::value::{MapRef, SeqRef};
use remap::{DynamicObject, Value, ValueType};
use std::io::Read;
use std::path::Path;

/// [`RowReader`] over a JSON document of the form `[{...}, {...}]`.
#[derive(Debug, Clone)]
pub struct JsonReader {
    inner: MemoryReader,
}

impl JsonReader {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_str(content)?;
        Self::from_json(document)
    }

    pub fn from_reader<T: Read>(reader: T) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_json(document)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RowError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let reader = Self::from_str(&content)?;
        log::debug!(
            "[rows] loaded {} rows from {}",
            reader.inner.remaining(),
            path.display()
        );
        Ok(reader)
    }

    pub fn from_json(document: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Array(items) = document else {
            return Err(RowError::InvalidFormat(
                "expected an array of objects".into(),
            ));
        };

        let mut objects = Vec::with_capacity(items.len());
        let mut names: IndexSet<String> = IndexSet::new();
        for (index, item) in items.into_iter().enumerate() {
            let serde_json::Value::Object(object) = item else {
                return Err(RowError::InvalidFormat(format!(
                    "row {} is not an object",
                    index
                )));
            };
            for key in object.keys() {
                if !names.contains(key) {
                    names.insert(key.clone());
                }
            }
            objects.push(object);
        }

        let mut inner = MemoryReader::new(names.iter().cloned());
        for mut object in objects {
            let row = names
                .iter()
                .map(|name| object.remove(name).map_or(Value::Null, json_to_value))
                .collect();
            inner.push_row(row)?;
        }
        Ok(Self { inner })
    }
}

impl RowReader for JsonReader {
    fn field_names(&self) -> &[String] {
        self.inner.field_names()
    }

    fn read(&mut self) -> Result<bool> {
        self.inner.read()
    }

    fn value(&self, index: usize) -> Option<&Value> {
        self.inner.value(index)
    }

    fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

/// Convert a JSON value into a runtime value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::I64(i)
            } else if let Some(u) = n.as_u64() {
                Value::U64(u)
            } else {
                Value::F64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Seq(SeqRef::list(
            ValueType::Any,
            items.into_iter().map(json_to_value).collect(),
        )),
        serde_json::Value::Object(map) => {
            let mut object = DynamicObject::with_capacity(map.len(), false);
            for (key, value) in map {
                object.insert(key, json_to_value(value));
            }
            Value::Map(MapRef::new(object))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_key_union() {
        let mut reader =
            JsonReader::from_str(r#"[{"id": 1, "name": "a"}, {"id": 2, "extra": true}]"#)
                .expect("json");
        assert_eq!(reader.field_names(), ["id", "name", "extra"]);

        assert!(reader.read().expect("read"));
        assert_eq!(reader.value(2), Some(&Value::Null));
        assert!(reader.read().expect("read"));
        assert_eq!(reader.value(0), Some(&Value::I64(2)));
        assert_eq!(reader.value(1), Some(&Value::Null));
        assert_eq!(reader.value(2), Some(&Value::Bool(true)));
        assert!(!reader.read().expect("read"));
    }

    #[test]
    fn test_wide_documents_keep_column_order() {
        let rows: Vec<serde_json::Value> = (0..2_000)
            .map(|i| serde_json::json!({ "shared": i, format!("c{}", i % 500): true }))
            .collect();
        let reader = JsonReader::from_json(serde_json::Value::Array(rows)).expect("json");
        assert_eq!(reader.field_count(), 501);
        assert_eq!(reader.field_names()[0], "c0");
        assert_eq!(reader.field_names()[1], "shared");
        assert_eq!(reader.field_names()[500], "c499");
    }

    #[test]
    fn test_nested_values() {
        let value = json_to_value(serde_json::json!({"tags": ["x", 1.5], "n": 18446744073709551615u64}));
        let map = value.as_map().expect("map");
        assert_eq!(map.get("N"), Some(Value::U64(u64::MAX)));
        let tags = map.get("tags").expect("tags");
        assert_eq!(
            tags.as_seq().map(SeqRef::items),
            Some(vec![Value::from("x"), Value::F64(1.5)])
        );
    }

    #[test]
    fn test_rejects_non_arrays() {
        assert!(matches!(
            JsonReader::from_str(r#"{"id": 1}"#),
            Err(RowError::InvalidFormat(_))
        ));
        assert!(matches!(
            JsonReader::from_str("[1, 2]"),
            Err(RowError::InvalidFormat(_))
        ));
        assert!(matches!(JsonReader::from_str("[{"), Err(RowError::Json(_))));
    }
}
