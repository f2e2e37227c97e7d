// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-value dispatch.
//!
//! Order of the rules:
//!
//! 1. undefined stays undefined (the member is skipped by the caller)
//! 2. null maps to null when the target accepts it
//! 3. sequences into sequence targets: arrays are always rebuilt, other
//!    shapes are shared when assignable and rebuilt element-wise otherwise
//! 4. scalars into value-like targets go through the coercer
//! 5. anything else assignable is passed through, except dictionaries
//! 6. dictionaries and objects into object-like targets build a new instance,
//!    so a dictionary is always copied
//!
//! Everything left over is a mismatch.

use super::walk::Walk;
use super::StructuralMapper;
use crate::coerce;
use crate::error::Result;
use crate::types::{SeqShape, ValueType};
use crate::value::{SeqRef, Value};

impl StructuralMapper {
    pub(super) fn map_inner(
        &self,
        value: &Value,
        target: &ValueType,
        walk: &mut Walk,
    ) -> Result<Value> {
        match value {
            Value::Undefined => return Ok(Value::Undefined),
            Value::Null if target.accepts_null() => return Ok(Value::Null),
            Value::Null => return self.mismatch(value, target),
            _ => {}
        }

        if let (Value::Seq(seq), ValueType::Sequence(shape, element)) = (value, target.underlying())
        {
            return self.map_sequence(seq, *shape, element, walk);
        }

        if value.is_scalar() && target.is_value_like() {
            let converted = if self.options.parse_values {
                coerce::try_parse(value, target)?
            } else {
                coerce::change_type(value, target)?
            };
            return match converted {
                Some(converted) => Ok(converted),
                None => self.mismatch(value, target),
            };
        }

        if !matches!(value, Value::Map(_)) {
            if let Some(source) = value.value_type() {
                if target.is_assignable_from(&source) {
                    return Ok(value.clone());
                }
            }
        }

        let structured = target.is_object_like() && !target.is_list_like();
        match value {
            Value::Map(map) if structured => {
                walk.enter(map.id(), || ValueType::Dictionary.to_string())?;
                let result = self.build_new(map.entries(), target, walk);
                walk.leave(map.id());
                result
            }
            Value::Object(object) if structured => {
                let pairs = self.object_to_dict(object, false, walk)?;
                walk.enter(object.id(), || object.class().name().to_string())?;
                let result = self.build_new(pairs.into_iter().collect(), target, walk);
                walk.leave(object.id());
                result
            }
            _ => self.mismatch(value, target),
        }
    }

    fn map_sequence(
        &self,
        seq: &SeqRef,
        shape: SeqShape,
        element: &ValueType,
        walk: &mut Walk,
    ) -> Result<Value> {
        let target = ValueType::sequence(shape, element.clone());
        if shape != SeqShape::Array && target.is_assignable_from(&seq.value_type()) {
            return Ok(Value::Seq(seq.clone()));
        }

        walk.enter(seq.id(), || seq.value_type().to_string())?;
        let result = self.map_elements(seq, element, walk);
        walk.leave(seq.id());

        Ok(match result? {
            Some(items) => Value::Seq(SeqRef::new(shape, element.clone(), items)),
            None => Value::Undefined,
        })
    }

    /// Mapped elements, or `None` when one of them does not fit.
    fn map_elements(
        &self,
        seq: &SeqRef,
        element: &ValueType,
        walk: &mut Walk,
    ) -> Result<Option<Vec<Value>>> {
        let mut items = Vec::with_capacity(seq.len());
        for item in seq.items() {
            let mapped = self.map_inner(&item, element, walk)?;
            if mapped.is_undefined() {
                return Ok(None);
            }
            items.push(mapped);
        }
        Ok(Some(items))
    }
}
