// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use remap::types::SeqShape;
use remap::value::SeqRef;
use remap::{
    ClassBuilder, ClassType, Describe, FromValue, MappingOptions, ModelCache, ObjectRef,
    StructuralMapper, Value, ValueType,
};
use std::sync::{Arc, OnceLock};

/// Object with one member of each interesting shape.
#[derive(Debug, Clone)]
pub struct TypedObject {
    pub string_prop: Option<String>,
    pub int_prop: i32,
    pub int_array: Option<SeqRef>,
    pub double_prop: f64,
    pub string_list: Option<SeqRef>,
    pub int_list: Option<SeqRef>,
    pub byte_array: Vec<u8>,
    pub object_prop: Value,
    pub date_time_prop: Option<chrono::NaiveDateTime>,
    pub bool_prop: bool,
    pub string_field: String,
    pub double_field: f64,
}

impl Default for TypedObject {
    fn default() -> Self {
        Self {
            string_prop: None,
            int_prop: 0,
            int_array: None,
            double_prop: 0.0,
            string_list: None,
            int_list: None,
            byte_array: Vec::new(),
            object_prop: Value::Null,
            date_time_prop: None,
            bool_prop: false,
            string_field: String::new(),
            double_field: 0.0,
        }
    }
}

fn seq_property(
    builder: ClassBuilder<TypedObject>,
    name: &str,
    value_type: ValueType,
    get: fn(&TypedObject) -> &Option<SeqRef>,
    set: fn(&mut TypedObject) -> &mut Option<SeqRef>,
) -> ClassBuilder<TypedObject> {
    builder.property(
        name,
        value_type,
        move |o| Value::from(get(o).clone()),
        move |o, v| {
            *set(o) = Option::<SeqRef>::from_value(v)?;
            Ok(())
        },
    )
}

impl Describe for TypedObject {
    fn describe() -> ClassType {
        static CLASS: OnceLock<ClassType> = OnceLock::new();
        CLASS
            .get_or_init(|| {
                let builder = ClassBuilder::<TypedObject>::new("TypedObject")
                    .typed("StringProp", |o| o.string_prop.clone(), |o, v| o.string_prop = v)
                    .typed("IntProp", |o| o.int_prop, |o, v| o.int_prop = v);
                let builder = seq_property(
                    builder,
                    "IntArray",
                    ValueType::array(ValueType::I32),
                    |o| &o.int_array,
                    |o| &mut o.int_array,
                );
                let builder = builder.typed("DoubleProp", |o| o.double_prop, |o, v| o.double_prop = v);
                let builder = seq_property(
                    builder,
                    "StringList",
                    ValueType::list(ValueType::String),
                    |o| &o.string_list,
                    |o| &mut o.string_list,
                );
                let builder = seq_property(
                    builder,
                    "IntList",
                    ValueType::sequence(SeqShape::Indexed, ValueType::I32),
                    |o| &o.int_list,
                    |o| &mut o.int_list,
                );
                builder
                    .typed("ByteArray", |o| o.byte_array.clone(), |o, v| o.byte_array = v)
                    .typed("ObjectProp", |o| o.object_prop.clone(), |o, v| o.object_prop = v)
                    .typed(
                        "DateTimeProp",
                        |o| o.date_time_prop,
                        |o, v| o.date_time_prop = v,
                    )
                    .typed("BoolProp", |o| o.bool_prop, |o, v| o.bool_prop = v)
                    .typed_field("StringField", |o| o.string_field.clone(), |o, v| o.string_field = v)
                    .typed_field("DoubleField", |o| o.double_field, |o, v| o.double_field = v)
                    .indexed_property("Item", ValueType::String, 1)
                    .constructible()
                    .build()
            })
            .clone()
    }
}

/// Derived type overriding `StringProp`.
#[derive(Debug, Clone, Default)]
pub struct DerivedObject {
    pub base: TypedObject,
    pub derived_property: String,
    pub derived_field: String,
}

impl Describe for DerivedObject {
    fn describe() -> ClassType {
        static CLASS: OnceLock<ClassType> = OnceLock::new();
        CLASS
            .get_or_init(|| {
                ClassBuilder::<DerivedObject>::new("DerivedObject")
                    .inherit::<TypedObject>(|d| &d.base, |d| &mut d.base)
                    .typed(
                        "StringProp",
                        |_| Some("derived_value".to_string()),
                        |d, v: Option<String>| d.base.string_prop = v,
                    )
                    .typed(
                        "DerivedProperty",
                        |d| d.derived_property.clone(),
                        |d, v| d.derived_property = v,
                    )
                    .typed_field(
                        "DerivedField",
                        |d| d.derived_field.clone(),
                        |d, v| d.derived_field = v,
                    )
                    .constructible()
                    .build()
            })
            .clone()
    }
}

/// Mapper over a fresh cache.
pub fn mapper(options: MappingOptions) -> StructuralMapper {
    StructuralMapper::with_options(Arc::new(ModelCache::new()), options)
}

pub fn int_array(items: &[i32]) -> SeqRef {
    SeqRef::array(ValueType::I32, items.iter().copied().map(Value::I32).collect())
}

/// Populated fixture instance.
pub fn sample() -> TypedObject {
    TypedObject {
        string_prop: Some("fox".into()),
        int_prop: 7,
        int_array: Some(int_array(&[1, 2, 4, 8])),
        double_prop: 3.14,
        string_list: Some(SeqRef::list(
            ValueType::String,
            vec![Value::from("a"), Value::from("b")],
        )),
        int_list: None,
        byte_array: b"bytes".to_vec(),
        object_prop: Value::Bool(true),
        date_time_prop: NaiveDate::from_ymd_opt(2024, 2, 29).and_then(|d| d.and_hms_opt(12, 30, 0)),
        bool_prop: true,
        string_field: "field".into(),
        double_field: 0.25,
    }
}

pub fn sample_ref() -> ObjectRef {
    ObjectRef::new(sample())
}
