// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::walk::Walk;
use super::StructuralMapper;
use crate::error::{MapError, Result};
use crate::types::ValueType;
use crate::value::{MapRef, ObjectRef, Value};

impl StructuralMapper {
    /// Fresh instance of `target` filled from `pairs`.
    pub(super) fn build_new(
        &self,
        pairs: Vec<(String, Value)>,
        target: &ValueType,
        walk: &mut Walk,
    ) -> Result<Value> {
        let instance = match target.underlying() {
            t if t.is_dictionary_shaped() => Value::Map(MapRef::new(self.new_dynamic(pairs.len()))),
            ValueType::Class(class) => Value::Object(class.instantiate()?),
            other => return Err(MapError::unsupported(ValueType::Dictionary, other)),
        };
        self.populate(pairs, &instance, walk)?;
        Ok(instance)
    }

    /// Write `pairs` into an existing object or dynamic object.
    pub(super) fn populate(
        &self,
        pairs: Vec<(String, Value)>,
        target: &Value,
        walk: &mut Walk,
    ) -> Result<()> {
        match target {
            Value::Map(map) => {
                for (key, value) in pairs {
                    let value = self.materialize(value, walk)?;
                    map.insert(key, value);
                }
                Ok(())
            }
            Value::Object(object) => self.populate_object(pairs, object, walk),
            other => Err(MapError::unsupported(ValueType::Dictionary, other.type_name())),
        }
    }

    fn populate_object(
        &self,
        pairs: Vec<(String, Value)>,
        object: &ObjectRef,
        walk: &mut Walk,
    ) -> Result<()> {
        let class = object.class();
        let model = self.cache.model(&class, &self.options)?;

        for (key, value) in pairs {
            let Some(accessor) = model.get(&key) else {
                log::trace!("[mapper] {}: no member for key '{}'", class.name(), key);
                continue;
            };
            if accessor.is_read_only() {
                log::debug!("[mapper] {}.{} is read-only, skipped", class.name(), accessor.name());
                continue;
            }
            let mapped = self.map_inner(&value, accessor.value_type(), walk)?;
            if mapped.is_undefined() {
                log::debug!(
                    "[mapper] {}.{}: {} left unassigned",
                    class.name(),
                    accessor.name(),
                    value.type_name()
                );
                continue;
            }
            accessor.set(object, mapped)?;
        }
        Ok(())
    }

    /// Copy dictionary-shaped values into fresh dynamic objects, recursively.
    pub(super) fn materialize(&self, value: Value, walk: &mut Walk) -> Result<Value> {
        let Value::Map(map) = value else {
            return Ok(value);
        };
        walk.enter(map.id(), || ValueType::Dictionary.to_string())?;
        let result = self.materialize_entries(&map, walk);
        walk.leave(map.id());
        result
    }

    fn materialize_entries(&self, map: &MapRef, walk: &mut Walk) -> Result<Value> {
        let mut out = self.new_dynamic(map.len());
        for (key, value) in map.entries() {
            out.insert(key, self.materialize(value, walk)?);
        }
        Ok(Value::Map(MapRef::new(out)))
    }
}
