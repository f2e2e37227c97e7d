// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Forward-only row cursors.

use crate::error::{Result, RowError};
use remap::Value;
use std::collections::VecDeque;

/// Cursor over rows of named columns.
///
/// A reader starts before the first row; [`RowReader::read`] advances and
/// reports whether a row is current. Column values are only meaningful
/// while a row is current.
pub trait RowReader {
    /// Column names, in column order.
    fn field_names(&self) -> &[String];

    /// Advance to the next row. `false` once the rows are exhausted.
    fn read(&mut self) -> Result<bool>;

    /// Value of column `index` in the current row.
    fn value(&self, index: usize) -> Option<&Value>;

    fn is_closed(&self) -> bool {
        false
    }

    fn field_count(&self) -> usize {
        self.field_names().len()
    }

    fn field_name(&self, index: usize) -> Option<&str> {
        self.field_names().get(index).map(String::as_str)
    }
}

impl<R: RowReader + ?Sized> RowReader for Box<R> {
    fn field_names(&self) -> &[String] {
        (**self).field_names()
    }

    fn read(&mut self) -> Result<bool> {
        (**self).read()
    }

    fn value(&self, index: usize) -> Option<&Value> {
        (**self).value(index)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

/// In-memory rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    names: Vec<String>,
    pending: VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
    closed: bool,
}

impl MemoryReader {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append a row. Short rows are padded with nulls.
    pub fn push_row(&mut self, mut values: Vec<Value>) -> Result<()> {
        if values.len() > self.names.len() {
            return Err(RowError::InvalidFormat(format!(
                "row has {} values for {} columns",
                values.len(),
                self.names.len()
            )));
        }
        values.resize(self.names.len(), Value::Null);
        self.pending.push_back(values);
        Ok(())
    }

    pub fn with_row(mut self, values: Vec<Value>) -> Result<Self> {
        self.push_row(values)?;
        Ok(self)
    }

    /// Rows not yet read.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Drop the remaining rows; further reads fail.
    pub fn close(&mut self) {
        self.pending.clear();
        self.current = None;
        self.closed = true;
    }
}

impl RowReader for MemoryReader {
    fn field_names(&self) -> &[String] {
        &self.names
    }

    fn read(&mut self) -> Result<bool> {
        if self.closed {
            return Err(RowError::Closed);
        }
        self.current = self.pending.pop_front();
        Ok(self.current.is_some())
    }

    fn value(&self, index: usize) -> Option<&Value> {
        self.current.as_ref().and_then(|row| row.get(index))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_walks_rows() {
        let mut reader = MemoryReader::new(["Id", "Name"])
            .with_row(vec![Value::I32(1), Value::from("a")])
            .and_then(|r| r.with_row(vec![Value::I32(2)]))
            .expect("rows");
        assert_eq!(reader.value(0), None);

        assert!(reader.read().expect("read"));
        assert_eq!(reader.value(1), Some(&Value::from("a")));
        assert!(reader.read().expect("read"));
        assert_eq!(reader.value(1), Some(&Value::Null));
        assert!(!reader.read().expect("read"));
        assert_eq!(reader.value(0), None);
    }

    #[test]
    fn test_rejects_wide_rows_and_closed_reads() {
        let mut reader = MemoryReader::new(["Id"]);
        assert!(matches!(
            reader.push_row(vec![Value::I32(1), Value::I32(2)]),
            Err(RowError::InvalidFormat(_))
        ));
        reader.close();
        assert!(matches!(reader.read(), Err(RowError::Closed)));
    }
}
