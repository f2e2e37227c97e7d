// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping Benchmark
//!
//! Measures the hot paths of the structural mapper:
//! - object to dictionary, shallow and deep
//! - dictionary to a new registered instance
//! - scalar coercion (strict and lenient)
//! - property view reads through the cached model

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use remap::value::SeqRef;
use remap::{
    coerce, ClassBuilder, ClassType, Describe, FromValue, MappingOptions, ModelCache, ObjectRef,
    StructuralMapper, Value, ValueType,
};
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Default)]
struct Telemetry {
    station: String,
    sequence: i64,
    temperature: f64,
    online: bool,
    samples: Option<SeqRef>,
}

impl Describe for Telemetry {
    fn describe() -> ClassType {
        static CLASS: OnceLock<ClassType> = OnceLock::new();
        CLASS
            .get_or_init(|| {
                ClassBuilder::<Telemetry>::new("Telemetry")
                    .typed("Station", |t| t.station.clone(), |t, v| t.station = v)
                    .typed("Sequence", |t| t.sequence, |t, v| t.sequence = v)
                    .typed("Temperature", |t| t.temperature, |t, v| t.temperature = v)
                    .typed("Online", |t| t.online, |t, v| t.online = v)
                    .property(
                        "Samples",
                        ValueType::list(ValueType::F64),
                        |t| Value::from(t.samples.clone()),
                        |t, v| {
                            t.samples = Option::<SeqRef>::from_value(v)?;
                            Ok(())
                        },
                    )
                    .constructible()
                    .build()
            })
            .clone()
    }
}

fn telemetry(samples: usize) -> ObjectRef {
    ObjectRef::new(Telemetry {
        station: "north-7".into(),
        sequence: 42,
        temperature: 21.5,
        online: true,
        samples: Some(SeqRef::list(
            ValueType::F64,
            (0..samples).map(|i| Value::F64(i as f64 * 0.5)).collect(),
        )),
    })
}

fn mapper(options: MappingOptions) -> StructuralMapper {
    StructuralMapper::with_options(Arc::new(ModelCache::new()), options)
}

fn bench_to_dictionary(c: &mut Criterion) {
    let m = mapper(MappingOptions::default());
    let mut group = c.benchmark_group("to_dictionary");
    for samples in [0usize, 16, 256] {
        let object = telemetry(samples);
        group.bench_with_input(BenchmarkId::new("shallow", samples), &object, |b, object| {
            b.iter(|| black_box(m.to_dictionary(black_box(object), false)));
        });
        group.bench_with_input(BenchmarkId::new("deep", samples), &object, |b, object| {
            b.iter(|| black_box(m.to_dictionary(black_box(object), true)));
        });
    }
    group.finish();
}

fn bench_to_new(c: &mut Criterion) {
    let m = mapper(MappingOptions::default());
    let dict = m
        .to_dictionary(&telemetry(16), false)
        .expect("dictionary");
    c.bench_function("to_new_of_telemetry", |b| {
        b.iter(|| black_box(m.to_new_of::<Telemetry, _>(black_box(&dict))));
    });

    let lenient = mapper(MappingOptions::default().with_parse_values(true));
    let text_row = [
        ("station", Value::from("south-2")),
        ("sequence", Value::from("1024")),
        ("temperature", Value::from("19.75")),
        ("online", Value::from("yes")),
    ];
    c.bench_function("to_new_of_parsed_text", |b| {
        b.iter(|| black_box(lenient.to_new_of::<Telemetry, _>(black_box(&text_row))));
    });
}

fn bench_coercion(c: &mut Criterion) {
    let mut group = c.benchmark_group("coerce");
    let integer = Value::from("12345.5");
    let boolean = Value::from("enabled");
    let wide = Value::I64(7);
    group.bench_function("parse_rounded_i64", |b| {
        b.iter(|| black_box(coerce::parse(black_box(&integer), &ValueType::I64)));
    });
    group.bench_function("parse_bool_token", |b| {
        b.iter(|| black_box(coerce::parse(black_box(&boolean), &ValueType::Bool)));
    });
    group.bench_function("change_type_i64_to_i32", |b| {
        b.iter(|| black_box(coerce::change_type(black_box(&wide), &ValueType::I32)));
    });
    group.finish();
}

fn bench_view_reads(c: &mut Criterion) {
    let m = mapper(MappingOptions::default());
    let view = m.as_dictionary(&telemetry(0)).expect("view");
    c.bench_function("view_get_case_insensitive", |b| {
        b.iter(|| black_box(view.get(black_box("TEMPERATURE"))));
    });
}

criterion_group!(
    benches,
    bench_to_dictionary,
    bench_to_new,
    bench_coercion,
    bench_view_reads
);
criterion_main!(benches);
