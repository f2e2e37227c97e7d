// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # remap - Structural data mapping
//!
//! Converts between typed objects and key/value dictionaries by member name:
//! objects to dictionaries (shallow or deep), dictionaries to new or existing
//! objects, single values between types with strict or lenient coercion, and
//! live dictionary views whose writes reach the underlying object.
//!
//! ## Quick Start
//!
//! ```rust
//! use remap::{ClassBuilder, ClassType, Describe, MappingOptions, ModelCache, StructuralMapper};
//! use remap::value::{ObjectRef, Value};
//! use std::sync::{Arc, OnceLock};
//!
//! #[derive(Default)]
//! struct Sensor {
//!     name: String,
//!     reading: f64,
//! }
//!
//! impl Describe for Sensor {
//!     fn describe() -> ClassType {
//!         static CLASS: OnceLock<ClassType> = OnceLock::new();
//!         CLASS
//!             .get_or_init(|| {
//!                 ClassBuilder::<Sensor>::new("Sensor")
//!                     .typed("Name", |s| s.name.clone(), |s, v| s.name = v)
//!                     .typed("Reading", |s| s.reading, |s, v| s.reading = v)
//!                     .constructible()
//!                     .build()
//!             })
//!             .clone()
//!     }
//! }
//!
//! fn main() -> remap::Result<()> {
//!     let mapper = StructuralMapper::with_options(
//!         Arc::new(ModelCache::new()),
//!         MappingOptions::default().with_parse_values(true),
//!     );
//!
//!     let sensor: Sensor =
//!         mapper.to_new_of(&[("name", Value::from("t1")), ("READING", Value::from("21.5"))])?;
//!     assert_eq!(sensor.reading, 21.5);
//!
//!     let dict = mapper.to_dictionary(&ObjectRef::new(sensor), false)?;
//!     assert_eq!(dict.get("Name"), Some(&Value::from("t1")));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |   StructuralMapper             PropertyView / DynamicAdapter  |
//! |   to_dictionary | to_new | to_existing | map | as_dictionary  |
//! +---------------------------------------------------------------+
//! |   coerce (try_parse / change_type)     MappingOptions         |
//! +---------------------------------------------------------------+
//! |   ModelCache (DashMap)  ->  ClassModel  ->  MemberAccessor    |
//! +---------------------------------------------------------------+
//! |   ClassBuilder / Describe   ->  ClassType (member registry)   |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StructuralMapper`] | Object/dictionary conversions under one options bundle |
//! | [`PropertyView`] | Live mutable dictionary over an object |
//! | [`ModelCache`] | Shared cache of per-type member models |
//! | [`MappingOptions`] | Member selection, case policy and coercion flags |
//! | [`Value`] | Runtime value: scalars, sequences, dictionaries, objects |
//! | [`ValueType`] | Declared type of a member or mapping target |
//!
//! ## Features
//!
//! - **profiles** (default): named option profiles from YAML or JSON files

/// Lenient and strict value coercion.
pub mod coerce;
/// Error type shared by all operations.
pub mod error;
/// Late-bound member access by name.
pub mod facade;
/// Object/dictionary conversions.
pub mod mapper;
/// Per-type member models and their cache.
pub mod model;
/// Mapping options, process defaults and profiles.
pub mod options;
/// Declared types and class descriptors.
pub mod types;
/// Runtime values.
pub mod value;
/// Live dictionary views over objects.
pub mod view;

pub use error::{MapError, Result};
pub use facade::{DynamicAdapter, LateBound};
pub use mapper::{KeyValues, StructuralMapper};
pub use model::{ClassModel, MemberAccessor, ModelCache};
pub use options::{DynamicObjectType, MappingOptions, ReflectionOptions};
pub use types::{ClassBuilder, ClassType, Describe, SeqShape, ValueType};
pub use value::{DynamicObject, FromValue, ObjectRef, Value, ValueKind, UNDEFINED};
pub use view::PropertyView;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
