// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural mapper.
//!
//! Converts between class instances and key/value representations:
//!
//! - object → dictionary, shallow or deep ([`StructuralMapper::to_dictionary`])
//! - dictionary → new or existing object ([`StructuralMapper::to_new`],
//!   [`StructuralMapper::to_existing`])
//! - one value into a target type ([`StructuralMapper::map`])
//! - live dictionary view over an object ([`StructuralMapper::as_dictionary`])
//!
//! Member models come from a shared [`ModelCache`]. The mapper itself is
//! immutable and cheap to clone; use one per options bundle.
//!
//! # Example
//!
//! ```
//! use remap::mapper::StructuralMapper;
//! use remap::model::ModelCache;
//! use remap::options::MappingOptions;
//! use remap::value::{DynamicObject, Value};
//! use remap::types::ValueType;
//! use std::sync::Arc;
//!
//! let mapper = StructuralMapper::with_options(Arc::new(ModelCache::new()), MappingOptions::default());
//! let mut source = DynamicObject::default();
//! source.insert("Name", Value::from("probe"));
//!
//! let copy = mapper.to_new(&source, &ValueType::Dictionary).unwrap();
//! assert_eq!(copy.as_map().unwrap().get("name"), Some(Value::from("probe")));
//! ```

mod dict_to_object;
mod dispatch;
mod object_to_dict;
mod source;
mod walk;

pub use source::KeyValues;

use crate::error::{MapError, Result};
use crate::facade::DynamicAdapter;
use crate::model::ModelCache;
use crate::options::MappingOptions;
use crate::types::{Describe, ValueType};
use crate::value::{DynamicObject, ObjectRef, Value};
use crate::view::PropertyView;
use std::sync::Arc;
use walk::Walk;

/// Mapping engine bound to one options bundle and a shared model cache.
#[derive(Debug, Clone)]
pub struct StructuralMapper {
    cache: Arc<ModelCache>,
    options: MappingOptions,
}

impl StructuralMapper {
    /// Mapper with the process-wide default options.
    pub fn new(cache: Arc<ModelCache>) -> Self {
        Self::with_options(cache, MappingOptions::inherited())
    }

    pub fn with_options(cache: Arc<ModelCache>, options: MappingOptions) -> Self {
        Self { cache, options }
    }

    pub fn options(&self) -> &MappingOptions {
        &self.options
    }

    pub fn cache(&self) -> &Arc<ModelCache> {
        &self.cache
    }

    /// Copy of this mapper using other options, sharing the cache.
    #[must_use]
    pub fn reconfigured(&self, options: MappingOptions) -> Self {
        Self::with_options(Arc::clone(&self.cache), options)
    }

    /// Read every modeled member of `object` into a dynamic object.
    ///
    /// With `deep`, nested objects, dictionaries and sequences are copied
    /// recursively; otherwise nested references are shared.
    pub fn to_dictionary(&self, object: &ObjectRef, deep: bool) -> Result<DynamicObject> {
        let mut walk = self.walk();
        self.object_to_dict(object, deep, &mut walk)
    }

    /// Build a new value of `target` from key/value pairs.
    ///
    /// Dictionary-shaped targets produce a fresh dynamic object; class
    /// targets a default-constructed instance.
    pub fn to_new<S: KeyValues + ?Sized>(&self, source: &S, target: &ValueType) -> Result<Value> {
        let mut walk = self.walk();
        self.build_new(source.key_values(), target, &mut walk)
    }

    /// [`to_new`](Self::to_new) for a registered type, returning it by value.
    pub fn to_new_of<T, S>(&self, source: &S) -> Result<T>
    where
        T: Describe,
        S: KeyValues + ?Sized,
    {
        let class = T::describe();
        let name = class.name().to_string();
        match self.to_new(source, &ValueType::Class(class))? {
            Value::Object(object) => object.into_inner::<T>().ok_or_else(|| {
                MapError::Configuration(format!("instance of {} escaped during mapping", name))
            }),
            other => Err(MapError::mismatch(name, other.type_name())),
        }
    }

    /// Write key/value pairs into an existing object or dictionary.
    pub fn to_existing<S: KeyValues + ?Sized>(&self, source: &S, target: &Value) -> Result<()> {
        let mut walk = self.walk();
        self.populate(source.key_values(), target, &mut walk)
    }

    /// [`to_existing`](Self::to_existing) into an object handle.
    pub fn to_existing_object<S: KeyValues + ?Sized>(
        &self,
        source: &S,
        target: &ObjectRef,
    ) -> Result<()> {
        self.to_existing(source, &Value::Object(target.clone()))
    }

    /// Materialize key/value pairs as a dynamic object, recursively.
    pub fn to_dynamic<S: KeyValues + ?Sized>(&self, source: &S) -> Result<DynamicObject> {
        let mut walk = self.walk();
        let mut out = self.new_dynamic(0);
        for (key, value) in source.key_values() {
            let value = self.materialize(value, &mut walk)?;
            out.insert(key, value);
        }
        Ok(out)
    }

    /// Map one value into `target`.
    ///
    /// Returns [`Value::Undefined`] for a mismatch when
    /// `fail_on_mismatched_types` is off.
    pub fn map(&self, value: &Value, target: &ValueType) -> Result<Value> {
        let mut walk = self.walk();
        self.map_inner(value, target, &mut walk)
    }

    /// Lenient single-value conversion for value-like and list targets.
    pub fn map_value(&self, value: &Value, target: &ValueType) -> Result<Value> {
        if target.is_value_like() && !matches!(value, Value::Seq(_)) {
            crate::coerce::parse(value, target)
        } else if target.is_list_like() {
            self.reconfigured(self.options.clone().with_parse_values(true))
                .map(value, target)
        } else {
            Err(MapError::unsupported(value.type_name(), target))
        }
    }

    /// Live mutable dictionary view over `object`.
    pub fn as_dictionary(&self, object: &ObjectRef) -> Result<PropertyView> {
        PropertyView::new(object.clone(), Arc::clone(&self.cache), self.options.clone())
    }

    /// Late-bound member access over `object`.
    pub fn as_dynamic(&self, object: &ObjectRef) -> Result<DynamicAdapter> {
        self.as_dictionary(object).map(DynamicAdapter::new)
    }

    fn walk(&self) -> Walk {
        Walk::new(self.options.max_depth)
    }

    fn new_dynamic(&self, capacity: usize) -> DynamicObject {
        DynamicObject::with_capacity(capacity, self.options.dynamic_case_sensitive())
    }

    /// Mismatch outcome under the options' strictness.
    fn mismatch(&self, value: &Value, target: &ValueType) -> Result<Value> {
        if self.options.fail_on_mismatched_types {
            return Err(MapError::mismatch(target, value.type_name()));
        }
        log::debug!(
            "[mapper] {} does not fit {}, left undefined",
            value.type_name(),
            target
        );
        Ok(Value::Undefined)
    }
}
