// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime values.
//!
//! Scalars (numbers, strings, bytes, dates, enums) have value semantics.
//! Sequences, dynamic objects and typed instances are shared references
//! compared by identity; use [`Value::structurally_eq`] for content
//! comparison.

mod convert;
mod dynamic;
mod refs;

pub use convert::{FromValue, ValueKind};
pub use dynamic::DynamicObject;
pub use refs::{MapRef, ObjectRef, SeqRef, Sequence};

use crate::types::{EnumType, ValueType};
use chrono::NaiveDateTime;
use std::fmt;
use std::sync::Arc;

/// The undefined marker: "no such value", distinct from null.
pub const UNDEFINED: Value = Value::Undefined;

/// Nesting limit for [`Value::structurally_eq`].
const STRUCTURAL_EQ_DEPTH: usize = 64;

/// A value of an enumeration type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    ty: Arc<EnumType>,
    value: i64,
}

impl EnumValue {
    pub fn new(ty: Arc<EnumType>, value: i64) -> Self {
        Self { ty, value }
    }

    pub fn enum_type(&self) -> &Arc<EnumType> {
        &self.ty
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Variant name, if the value names a declared variant.
    pub fn name(&self) -> Option<&str> {
        self.ty.name_of(self.value)
    }
}

/// A dynamic value.
#[derive(Clone)]
pub enum Value {
    Null,
    /// The undefined marker. See [`UNDEFINED`].
    Undefined,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    DateTime(NaiveDateTime),
    Enum(EnumValue),

    // Shared references
    Seq(SeqRef),
    Map(MapRef),
    Object(ObjectRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// True for values without further mappable structure.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Seq(_) | Self::Map(_) | Self::Object(_))
    }

    /// Runtime type of the value. `None` for null and undefined.
    pub fn value_type(&self) -> Option<ValueType> {
        let ty = match self {
            Self::Null | Self::Undefined => return None,
            Self::Bool(_) => ValueType::Bool,
            Self::Char(_) => ValueType::Char,
            Self::I8(_) => ValueType::I8,
            Self::I16(_) => ValueType::I16,
            Self::I32(_) => ValueType::I32,
            Self::I64(_) => ValueType::I64,
            Self::U8(_) => ValueType::U8,
            Self::U16(_) => ValueType::U16,
            Self::U32(_) => ValueType::U32,
            Self::U64(_) => ValueType::U64,
            Self::F32(_) => ValueType::F32,
            Self::F64(_) => ValueType::F64,
            Self::String(_) => ValueType::String,
            Self::Bytes(_) => ValueType::Bytes,
            Self::DateTime(_) => ValueType::DateTime,
            Self::Enum(e) => ValueType::Enum(Arc::clone(e.enum_type())),
            Self::Seq(seq) => seq.value_type(),
            Self::Map(_) => ValueType::Dictionary,
            Self::Object(obj) => ValueType::Class(obj.class()),
        };
        Some(ty)
    }

    /// Name of the runtime type, for diagnostics.
    pub fn type_name(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Undefined => "undefined".to_string(),
            other => other
                .value_type()
                .map(|t| t.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Any integer variant widened to i128.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Self::I8(v) => Some(i128::from(*v)),
            Self::I16(v) => Some(i128::from(*v)),
            Self::I32(v) => Some(i128::from(*v)),
            Self::I64(v) => Some(i128::from(*v)),
            Self::U8(v) => Some(i128::from(*v)),
            Self::U16(v) => Some(i128::from(*v)),
            Self::U32(v) => Some(i128::from(*v)),
            Self::U64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// Any numeric variant as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F32(v) => Some(f64::from(*v)),
            Self::F64(v) => Some(*v),
            other => other.as_integer().map(|v| v as f64),
        }
    }

    pub fn as_seq(&self) -> Option<&SeqRef> {
        match self {
            Self::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapRef> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Content comparison through shared references.
    ///
    /// Sequences compare element-wise, dynamic objects entry-wise (order
    /// insensitive), typed instances member-wise when they share a class.
    pub fn structurally_eq(&self, other: &Value) -> bool {
        structurally_eq(self, other, 0)
    }
}

fn structurally_eq(a: &Value, b: &Value, depth: usize) -> bool {
    if depth > STRUCTURAL_EQ_DEPTH {
        return false;
    }
    match (a, b) {
        (Value::Seq(x), Value::Seq(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let (xs, ys) = (x.items(), y.items());
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(l, r)| structurally_eq(l, r, depth + 1))
        }
        (Value::Map(x), Value::Map(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let (xs, ys) = (x.snapshot(), y.snapshot());
            xs.len() == ys.len()
                && xs.iter().all(|(key, l)| {
                    ys.get(key)
                        .is_some_and(|r| structurally_eq(l, r, depth + 1))
                })
        }
        (Value::Object(x), Value::Object(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let class = x.class();
            if class != y.class() {
                return false;
            }
            class
                .members()
                .iter()
                .filter_map(|decl| decl.getter.clone())
                .all(|getter| {
                    match (x.with_any(|o| getter(o)), y.with_any(|o| getter(o))) {
                        (Ok(l), Ok(r)) => structurally_eq(&l, &r, depth + 1),
                        _ => false,
                    }
                })
        }
        (l, r) => l == r,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) | (Self::Undefined, Self::Undefined) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::I8(a), Self::I8(b)) => a == b,
            (Self::I16(a), Self::I16(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U8(a), Self::U8(b)) => a == b,
            (Self::U16(a), Self::U16(b)) => a == b,
            (Self::U32(a), Self::U32(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a.ptr_eq(b),
            (Self::Map(a), Self::Map(b)) => a.ptr_eq(b),
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Undefined => write!(f, "Undefined"),
            Self::String(s) => write!(f, "String({:?})", s),
            Self::Bytes(b) => write!(f, "Bytes({:?})", b),
            Self::Enum(e) => write!(f, "Enum({}::{})", e.enum_type().name(), self),
            Self::Seq(seq) => write!(f, "{:?}", seq),
            Self::Map(map) => write!(f, "{:?}", map),
            Self::Object(obj) => write!(f, "{:?}", obj),
            other => write!(f, "{}({})", other.type_name(), other),
        }
    }
}

/// Textual form of a value, used by string coercion.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Undefined => Ok(()),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Char(v) => write!(f, "{}", v),
            Self::I8(v) => write!(f, "{}", v),
            Self::I16(v) => write!(f, "{}", v),
            Self::I32(v) => write!(f, "{}", v),
            Self::I64(v) => write!(f, "{}", v),
            Self::U8(v) => write!(f, "{}", v),
            Self::U16(v) => write!(f, "{}", v),
            Self::U32(v) => write!(f, "{}", v),
            Self::U64(v) => write!(f, "{}", v),
            Self::F32(v) => write!(f, "{}", v),
            Self::F64(v) => write!(f, "{}", v),
            Self::String(s) => write!(f, "{}", s),
            Self::Bytes(bytes) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::Enum(e) => match e.name() {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "{}", e.value()),
            },
            Self::Seq(seq) => {
                write!(f, "[")?;
                for (i, item) in seq.items().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Map(map) => write!(f, "{{{} entries}}", map.len()),
            Self::Object(obj) => write!(f, "{}", obj.class().name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SeqShape;

    #[test]
    fn test_undefined_is_distinct_from_null() {
        assert_ne!(UNDEFINED, Value::Null);
        assert!(UNDEFINED.is_undefined());
        assert_eq!(UNDEFINED, Value::Undefined);
    }

    #[test]
    fn test_scalars_compare_by_value() {
        assert_eq!(Value::from("fox"), Value::String("fox".into()));
        assert_ne!(Value::I32(1), Value::I64(1));
        assert_eq!(Value::I32(1).as_integer(), Value::I64(1).as_integer());
    }

    #[test]
    fn test_sequences_compare_by_identity() {
        let a = SeqRef::array(ValueType::I32, vec![Value::I32(1), Value::I32(2)]);
        let b = SeqRef::array(ValueType::I32, vec![Value::I32(1), Value::I32(2)]);
        assert_ne!(Value::Seq(a.clone()), Value::Seq(b.clone()));
        assert_eq!(Value::Seq(a.clone()), Value::Seq(a.clone()));
        assert!(Value::Seq(a).structurally_eq(&Value::Seq(b)));
    }

    #[test]
    fn test_value_type_of_sequence() {
        let seq = SeqRef::set(ValueType::I32, vec![Value::I32(1)]);
        assert_eq!(
            Value::Seq(seq).value_type(),
            Some(ValueType::sequence(SeqShape::Set, ValueType::I32))
        );
        assert_eq!(Value::Null.value_type(), None);
    }

    #[test]
    fn test_textual_form() {
        assert_eq!(Value::F64(3.14).to_string(), "3.14");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");
        let color = EnumType::new("Color", [("Red", 1)]);
        assert_eq!(Value::Enum(EnumValue::new(color, 1)).to_string(), "Red");
        let seq = SeqRef::list(ValueType::I32, vec![Value::I32(1), Value::I32(2)]);
        assert_eq!(Value::Seq(seq).to_string(), "[1, 2]");
    }
}
