// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::reader::RowReader;
use remap::{DynamicObject, KeyValues, Value};

/// Read-only view of the current row of a reader.
///
/// Column lookup ignores case unless the view was built case-sensitive.
pub struct RecordView<'a, R: RowReader + ?Sized> {
    reader: &'a R,
    case_sensitive: bool,
}

impl<'a, R: RowReader + ?Sized> RecordView<'a, R> {
    pub fn new(reader: &'a R, case_sensitive: bool) -> Self {
        Self {
            reader,
            case_sensitive,
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        let index = self.index_of(name)?;
        self.reader.value(index)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn keys(&self) -> &'a [String] {
        self.reader.field_names()
    }

    pub fn len(&self) -> usize {
        self.reader.field_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (column, value) pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let reader = self.reader;
        reader
            .field_names()
            .iter()
            .enumerate()
            .filter_map(move |(i, name)| reader.value(i).map(|v| (name.as_str(), v)))
    }

    /// Detached copy of the row.
    pub fn to_dynamic(&self) -> DynamicObject {
        let mut out = DynamicObject::with_capacity(self.len(), self.case_sensitive);
        for (name, value) in self.iter() {
            out.insert(name, value.clone());
        }
        out
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        let names = self.reader.field_names();
        if self.case_sensitive {
            names.iter().position(|n| n == name)
        } else {
            let folded = name.to_lowercase();
            names.iter().position(|n| n.to_lowercase() == folded)
        }
    }
}

impl<R: RowReader + ?Sized> KeyValues for RecordView<'_, R> {
    fn key_values(&self) -> Vec<(String, Value)> {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }
}
