// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::walk::Walk;
use super::StructuralMapper;
use crate::error::Result;
use crate::model::ClassModel;
use crate::types::ValueType;
use crate::value::{DynamicObject, MapRef, ObjectRef, SeqRef, Value};

impl StructuralMapper {
    pub(super) fn object_to_dict(
        &self,
        object: &ObjectRef,
        deep: bool,
        walk: &mut Walk,
    ) -> Result<DynamicObject> {
        let class = object.class();
        let model = self.cache.model(&class, &self.options)?;
        walk.enter(object.id(), || class.name().to_string())?;
        let result = self.read_members(object, &model, deep, walk);
        walk.leave(object.id());
        result
    }

    fn read_members(
        &self,
        object: &ObjectRef,
        model: &ClassModel,
        deep: bool,
        walk: &mut Walk,
    ) -> Result<DynamicObject> {
        let mut out = self.new_dynamic(model.len());
        for accessor in model.iter() {
            let value = accessor.get(object)?;
            let value = if deep {
                self.deep_copy(value, walk)?
            } else {
                value
            };
            out.insert(accessor.name(), value);
        }
        Ok(out)
    }

    /// Copy of `value` sharing no mutable container with the original.
    fn deep_copy(&self, value: Value, walk: &mut Walk) -> Result<Value> {
        match value {
            Value::Object(object) => {
                let dict = self.object_to_dict(&object, true, walk)?;
                Ok(Value::Map(MapRef::new(dict)))
            }
            Value::Seq(seq) => {
                walk.enter(seq.id(), || seq.value_type().to_string())?;
                let result = self.copy_sequence(&seq, walk);
                walk.leave(seq.id());
                result
            }
            Value::Map(map) => {
                walk.enter(map.id(), || ValueType::Dictionary.to_string())?;
                let result = self.copy_map(&map, walk);
                walk.leave(map.id());
                result
            }
            scalar => Ok(scalar),
        }
    }

    fn copy_sequence(&self, seq: &SeqRef, walk: &mut Walk) -> Result<Value> {
        let mut items = Vec::with_capacity(seq.len());
        for item in seq.items() {
            items.push(self.deep_copy(item, walk)?);
        }
        // Objects come back as dictionaries; only value-like element types
        // describe the copy.
        let element = seq.element_type();
        let element = if element.is_value_like() {
            element
        } else {
            ValueType::Any
        };
        Ok(Value::Seq(SeqRef::new(seq.shape(), element, items)))
    }

    fn copy_map(&self, map: &MapRef, walk: &mut Walk) -> Result<Value> {
        let mut out = self.new_dynamic(map.len());
        for (key, value) in map.entries() {
            out.insert(key, self.deep_copy(value, walk)?);
        }
        Ok(Value::Map(MapRef::new(out)))
    }
}
