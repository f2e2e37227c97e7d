// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bound member accessors.

use crate::error::{MapError, Result};
use crate::types::{Getter, MemberKind, Setter, ValueType};
use crate::value::{ObjectRef, Value};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Getter/setter pair plus metadata for one member of one type.
///
/// Identity is (declaring type, name). Read-only members carry a setter
/// that always fails.
pub struct MemberAccessor {
    name: String,
    kind: MemberKind,
    value_type: ValueType,
    declaring: String,
    declaring_id: TypeId,
    declared: bool,
    private: bool,
    read_only: bool,
    index: usize,
    getter: Getter,
    setter: Setter,
}

/// Attributes of an accessor under construction.
pub(crate) struct AccessorSpec {
    pub name: String,
    pub kind: MemberKind,
    pub value_type: ValueType,
    pub declaring: String,
    pub declaring_id: TypeId,
    pub declared: bool,
    pub private: bool,
    pub getter: Getter,
    pub setter: Option<Setter>,
}

impl MemberAccessor {
    pub(crate) fn new(spec: AccessorSpec, index: usize) -> Self {
        let read_only = spec.setter.is_none();
        let setter = spec
            .setter
            .unwrap_or_else(|| read_only_setter(spec.name.clone()));
        Self {
            name: spec.name,
            kind: spec.kind,
            value_type: spec.value_type,
            declaring: spec.declaring,
            declaring_id: spec.declaring_id,
            declared: spec.declared,
            private: spec.private,
            read_only,
            index,
            getter: spec.getter,
            setter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn is_field(&self) -> bool {
        self.kind == MemberKind::Field
    }

    pub fn is_property(&self) -> bool {
        self.kind == MemberKind::Property
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn is_value_like(&self) -> bool {
        self.value_type.is_value_like()
    }

    pub fn is_nullable(&self) -> bool {
        self.value_type.accepts_null()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Declared by the modeled type itself rather than inherited.
    pub fn is_declared(&self) -> bool {
        self.declared
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    pub fn declaring_class(&self) -> &str {
        &self.declaring
    }

    /// (declaring type, name).
    pub fn identity(&self) -> (TypeId, &str) {
        (self.declaring_id, &self.name)
    }

    /// Ordinal in the full-detail model.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Read the member from `target`.
    pub fn get(&self, target: &ObjectRef) -> Result<Value> {
        target.with_any(|obj| (self.getter)(obj))
    }

    /// Write an already-coerced value into `target`.
    pub fn set(&self, target: &ObjectRef, value: Value) -> Result<()> {
        target.with_any_mut(|obj| (self.setter)(obj, value))
    }
}

fn read_only_setter(name: String) -> Setter {
    Arc::new(move |_: &mut dyn Any, _: Value| {
        Err(MapError::Configuration(format!(
            "member '{}' is read-only",
            name
        )))
    })
}

impl fmt::Debug for MemberAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberAccessor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value_type", &self.value_type)
            .field("declaring", &self.declaring)
            .field("declared", &self.declared)
            .field("private", &self.private)
            .field("read_only", &self.read_only)
            .field("index", &self.index)
            .finish()
    }
}
