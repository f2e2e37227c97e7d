// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # remap-rows
//!
//! Tabular row sources for the `remap` structural mapper.
//!
//! A [`RowReader`] is a forward-only cursor over rows of named columns.
//! [`Rows`] turns a reader into a lazy, single-pass iterator of key/value
//! rows, which can be viewed in place ([`RecordView`]), copied into dynamic
//! objects, or mapped into registered types ([`TypedRows`]).
//!
//! ```rust
//! use remap_rows::{MemoryReader, Rows};
//! use remap::Value;
//!
//! let reader = MemoryReader::new(["Id", "Name"])
//!     .with_row(vec![Value::I32(1), Value::from("alpha")])?;
//!
//! for row in Rows::new(reader)?.dynamic() {
//!     let row = row?;
//!     assert_eq!(row.get("name"), Some(&Value::from("alpha")));
//! }
//! # Ok::<(), remap_rows::RowError>(())
//! ```

pub mod error;
pub mod json;
pub mod reader;
pub mod record;
pub mod rows;

pub use error::{Result, RowError};
pub use json::{json_to_value, JsonReader};
pub use reader::{MemoryReader, RowReader};
pub use record::RecordView;
pub use rows::{Rows, TypedRows};
