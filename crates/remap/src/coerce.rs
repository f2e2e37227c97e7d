// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value coercion.
//!
//! Two conversion policies:
//!
//! - [`try_parse`]: lenient. Trims text, accepts boolean tokens such as
//!   `yes`/`off`, rounds numeric text half away from zero, understands several
//!   date formats.
//! - [`change_type`]: strict. Exact text parsing and range-checked numeric
//!   conversion only.
//!
//! Both return `Ok(Some(v))` on success, `Ok(None)` when the value does not
//! fit the target, and `Err(UnsupportedConversion)` when the pairing is not
//! one the engine understands at all.
//!
//! # Example
//!
//! ```rust
//! use remap::coerce;
//! use remap::types::ValueType;
//! use remap::value::Value;
//!
//! assert_eq!(coerce::parse(&Value::from("yes"), &ValueType::Bool), Ok(Value::Bool(true)));
//! assert_eq!(coerce::parse(&Value::from("12345.5"), &ValueType::I64), Ok(Value::I64(12346)));
//! assert!(coerce::parse(&Value::from(""), &ValueType::I64).is_err());
//! ```

use crate::error::{MapError, Result};
use crate::types::ValueType;
use crate::value::{EnumValue, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const TRUE_TOKENS: [&str; 6] = ["on", "yes", "true", "enabled", "active", "1"];
const FALSE_TOKENS: [&str; 5] = ["off", "no", "false", "disabled", "0"];

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d %B %Y"];

/// Null, undefined and empty strings count as "no value".
pub fn is_null_like(value: &Value) -> bool {
    match value {
        Value::Null | Value::Undefined => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Lenient conversion of `value` into `target`.
pub fn try_parse(value: &Value, target: &ValueType) -> Result<Option<Value>> {
    let underlying = target.underlying();

    if is_null_like(value) {
        // String targets keep the value as-is, empty string included.
        if *underlying == ValueType::String {
            return Ok(Some(match value {
                Value::Undefined => Value::Null,
                other => other.clone(),
            }));
        }
        return Ok(target.accepts_null().then_some(Value::Null));
    }

    if let Some(source) = value.value_type() {
        if target.is_assignable_from(&source) {
            return Ok(Some(value.clone()));
        }
    }

    if *underlying == ValueType::String {
        return Ok(Some(Value::String(value.to_string())));
    }

    let raw = value.to_string();
    let text = raw.trim();
    match underlying {
        ValueType::Bool => Ok(parse_bool_token(text)),
        ValueType::Enum(ty) => {
            let parsed = ty
                .value_of(text)
                .or_else(|| text.parse::<i64>().ok().filter(|v| ty.name_of(*v).is_some()));
            Ok(parsed.map(|v| Value::Enum(EnumValue::new(ty.clone(), v))))
        }
        t if t.is_integer() => Ok(parse_lenient_integer(text).and_then(|n| integer_value(n, t))),
        t if t.is_float() => Ok(text.parse::<f64>().ok().and_then(|f| float_value(f, t))),
        ValueType::DateTime => Ok(parse_date_time(text).map(Value::DateTime)),
        ValueType::Char => Ok(single_char(&raw).or_else(|| single_char(text))),
        _ => Err(MapError::unsupported(value.type_name(), target)),
    }
}

/// [`try_parse`], with ordinary coercion failure raised as `TypeMismatch`.
pub fn parse(value: &Value, target: &ValueType) -> Result<Value> {
    try_parse(value, target)?.ok_or_else(|| MapError::mismatch(target, describe(value)))
}

/// Strict conversion of `value` into `target`.
pub fn change_type(value: &Value, target: &ValueType) -> Result<Option<Value>> {
    let underlying = target.underlying();

    if matches!(value, Value::Null | Value::Undefined) {
        return Ok(target.accepts_null().then_some(Value::Null));
    }

    if let Some(source) = value.value_type() {
        if target.is_assignable_from(&source) {
            return Ok(Some(value.clone()));
        }
    }

    match underlying {
        ValueType::String => Ok(Some(Value::String(value.to_string()))),
        t if t.is_numeric() => Ok(match value {
            Value::String(s) if t.is_integer() => s.parse::<i128>().ok().and_then(|n| integer_value(n, t)),
            Value::String(s) => s.parse::<f64>().ok().and_then(|f| float_value(f, t)),
            Value::Bool(b) => integer_value(i128::from(*b), t).or_else(|| float_value(f64::from(u8::from(*b)), t)),
            Value::Enum(e) => integer_value(i128::from(e.value()), t),
            other => convert_number(other, t),
        }),
        ValueType::Bool => Ok(match value {
            Value::String(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(Value::Bool(true))
                } else if s.eq_ignore_ascii_case("false") {
                    Some(Value::Bool(false))
                } else {
                    None
                }
            }
            other => other.as_f64().map(|n| Value::Bool(n != 0.0)),
        }),
        ValueType::Enum(ty) => Ok(match value {
            Value::String(s) => ty
                .variants()
                .iter()
                .find(|(name, _)| name == s)
                .map(|(_, v)| Value::Enum(EnumValue::new(ty.clone(), *v))),
            other => other
                .as_integer()
                .and_then(|n| i64::try_from(n).ok())
                .filter(|v| ty.name_of(*v).is_some())
                .map(|v| Value::Enum(EnumValue::new(ty.clone(), v))),
        }),
        ValueType::Char => Ok(match value {
            Value::String(s) => single_char(s),
            other => other
                .as_integer()
                .and_then(|n| u32::try_from(n).ok())
                .and_then(char::from_u32)
                .map(Value::Char),
        }),
        ValueType::DateTime => match value {
            Value::String(s) => Ok(parse_date_time(s).map(Value::DateTime)),
            other => Err(MapError::unsupported(other.type_name(), target)),
        },
        _ => Err(MapError::unsupported(value.type_name(), target)),
    }
}

/// Boolean token table, case-insensitive.
pub fn parse_bool_token(text: &str) -> Option<Value> {
    let token = text.trim().to_ascii_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Some(Value::Bool(true))
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Some(Value::Bool(false))
    } else {
        None
    }
}

/// Date/time text in one of the accepted formats.
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Exact integer text, else double text rounded half away from zero.
fn parse_lenient_integer(text: &str) -> Option<i128> {
    if let Ok(n) = text.parse::<i128>() {
        return Some(n);
    }
    let f = text.parse::<f64>().ok()?;
    round_to_integer(f)
}

fn round_to_integer(f: f64) -> Option<i128> {
    if !f.is_finite() {
        return None;
    }
    // f64::round rounds half away from zero.
    let rounded = f.round();
    if rounded < i128::MIN as f64 || rounded > i128::MAX as f64 {
        return None;
    }
    Some(rounded as i128)
}

fn convert_number(value: &Value, target: &ValueType) -> Option<Value> {
    if let Some(n) = value.as_integer() {
        return if target.is_integer() {
            integer_value(n, target)
        } else {
            float_value(n as f64, target)
        };
    }
    let f = value.as_f64()?;
    if target.is_integer() {
        round_to_integer(f).and_then(|n| integer_value(n, target))
    } else {
        float_value(f, target)
    }
}

fn integer_value(n: i128, target: &ValueType) -> Option<Value> {
    match target.underlying() {
        ValueType::I8 => i8::try_from(n).ok().map(Value::I8),
        ValueType::I16 => i16::try_from(n).ok().map(Value::I16),
        ValueType::I32 => i32::try_from(n).ok().map(Value::I32),
        ValueType::I64 => i64::try_from(n).ok().map(Value::I64),
        ValueType::U8 => u8::try_from(n).ok().map(Value::U8),
        ValueType::U16 => u16::try_from(n).ok().map(Value::U16),
        ValueType::U32 => u32::try_from(n).ok().map(Value::U32),
        ValueType::U64 => u64::try_from(n).ok().map(Value::U64),
        _ => None,
    }
}

fn float_value(f: f64, target: &ValueType) -> Option<Value> {
    match target.underlying() {
        ValueType::F32 => {
            let narrowed = f as f32;
            // Finite doubles beyond the f32 range saturate to infinity.
            (narrowed.is_finite() || !f.is_finite()).then_some(Value::F32(narrowed))
        }
        ValueType::F64 => Some(Value::F64(f)),
        _ => None,
    }
}

fn single_char(text: &str) -> Option<Value> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(Value::Char(c)),
        _ => None,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{:?}", s),
        other => format!("{} {}", other.type_name(), other),
    }
}
