// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Row iterators.

use crate::error::{Result, RowError};
use crate::reader::RowReader;
use crate::record::RecordView;
use remap::{Describe, DynamicObject, StructuralMapper, Value};
use std::marker::PhantomData;

/// Single-pass iterator of key/value rows.
///
/// Each item is a detached copy of one row, in column order.
pub struct Rows<R: RowReader> {
    reader: R,
    case_sensitive: bool,
    rows_read: u64,
    done: bool,
}

impl<R: RowReader> Rows<R> {
    /// Wrap an open reader.
    pub fn new(reader: R) -> Result<Self> {
        if reader.is_closed() {
            return Err(RowError::Closed);
        }
        Ok(Self {
            reader,
            case_sensitive: false,
            rows_read: 0,
            done: false,
        })
    }

    /// Match column names case-sensitively in records and dynamic rows.
    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Advance and borrow the new current row.
    pub fn next_record(&mut self) -> Result<Option<RecordView<'_, R>>> {
        if !self.advance()? {
            return Ok(None);
        }
        Ok(Some(RecordView::new(&self.reader, self.case_sensitive)))
    }

    /// Rows as dynamic objects.
    pub fn dynamic(self) -> impl Iterator<Item = Result<DynamicObject>> {
        let case_sensitive = self.case_sensitive;
        self.map(move |row| {
            row.map(|pairs| {
                let mut out = DynamicObject::with_capacity(pairs.len(), case_sensitive);
                for (key, value) in pairs {
                    out.insert(key, value);
                }
                out
            })
        })
    }

    /// Rows mapped into `T`.
    pub fn typed<T: Describe>(self, mapper: StructuralMapper) -> TypedRows<R, T> {
        TypedRows {
            rows: self,
            mapper,
            _marker: PhantomData,
        }
    }

    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn advance(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        match self.reader.read() {
            Ok(true) => {
                self.rows_read += 1;
                Ok(true)
            }
            Ok(false) => {
                self.done = true;
                log::debug!("[rows] exhausted after {} rows", self.rows_read);
                Ok(false)
            }
            Err(e) => {
                self.done = true;
                Err(e)
            }
        }
    }

    fn current_pairs(&self) -> Vec<(String, Value)> {
        (0..self.reader.field_count())
            .filter_map(|i| {
                let name = self.reader.field_name(i)?;
                let value = self.reader.value(i)?;
                Some((name.to_string(), value.clone()))
            })
            .collect()
    }
}

impl<R: RowReader> Iterator for Rows<R> {
    type Item = Result<Vec<(String, Value)>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => Some(Ok(self.current_pairs())),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Rows mapped into instances of `T`.
pub struct TypedRows<R: RowReader, T> {
    rows: Rows<R>,
    mapper: StructuralMapper,
    _marker: PhantomData<fn() -> T>,
}

impl<R: RowReader, T: Describe> Iterator for TypedRows<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(row.and_then(|pairs| self.mapper.to_new_of::<T, _>(&pairs).map_err(RowError::from)))
    }
}
