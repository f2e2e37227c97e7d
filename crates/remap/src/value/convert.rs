// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversions between Rust values and [`Value`].
//!
//! `FromValue` is strict: it extracts exactly the variant a Rust type maps
//! to. Lenient conversion lives in [`crate::coerce`]; setters receive values
//! that were already coerced to the member's declared type.

use crate::error::{MapError, Result};
use crate::types::ValueType;
use crate::value::{DynamicObject, EnumValue, MapRef, ObjectRef, SeqRef, Value};
use chrono::NaiveDateTime;

/// Static value type of a Rust type.
pub trait ValueKind {
    fn value_type() -> ValueType;
}

/// Strict extraction of a Rust value.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ValueKind for $ty {
                fn value_type() -> ValueType {
                    ValueType::$variant
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(MapError::mismatch(ValueType::$variant, other.type_name())),
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

scalar_conversions! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    NaiveDateTime => DateTime,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

impl From<SeqRef> for Value {
    fn from(v: SeqRef) -> Self {
        Value::Seq(v)
    }
}

impl From<MapRef> for Value {
    fn from(v: MapRef) -> Self {
        Value::Map(v)
    }
}

impl From<DynamicObject> for Value {
    fn from(v: DynamicObject) -> Self {
        Value::Map(MapRef::new(v))
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: ValueKind> ValueKind for Option<T> {
    fn value_type() -> ValueType {
        ValueType::nullable(T::value_type())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// `Value` members are typed as the generic object placeholder.
impl ValueKind for Value {
    fn value_type() -> ValueType {
        ValueType::Any
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl ValueKind for MapRef {
    fn value_type() -> ValueType {
        ValueType::Dictionary
    }
}

impl FromValue for MapRef {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(MapError::mismatch(ValueType::Dictionary, other.type_name())),
        }
    }
}

impl FromValue for SeqRef {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Seq(seq) => Ok(seq),
            other => Err(MapError::mismatch("sequence", other.type_name())),
        }
    }
}

impl FromValue for ObjectRef {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(obj) => Ok(obj),
            other => Err(MapError::mismatch("object", other.type_name())),
        }
    }
}

impl FromValue for EnumValue {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Enum(e) => Ok(e),
            other => Err(MapError::mismatch("enum", other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_extraction() {
        assert_eq!(i64::from_value(Value::I64(5)), Ok(5));
        assert!(i64::from_value(Value::I32(5)).is_err());
        assert_eq!(String::from_value(Value::from("x")), Ok("x".to_string()));
    }

    #[test]
    fn test_option_maps_null() {
        assert_eq!(Option::<i64>::from_value(Value::Null), Ok(None));
        assert_eq!(Option::<i64>::from_value(Value::I64(2)), Ok(Some(2)));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(
            Option::<i64>::value_type(),
            ValueType::nullable(ValueType::I64)
        );
    }
}
