//! Benchmarks for rule application
//!
//! Copyright (c) 2025 Normalize Data Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use normalize_core::{built_in, normalize, path, Record, Rule, RuleBuilder};
use serde_json::{json, Value};

fn create_record(fields: usize) -> Record {
    let mut record = Record::new();
    for i in 0..fields {
        record.insert(
            format!("field{}", i),
            json!({"value": i, "label": format!("Item {}", i), "tags": "a, b, c"}),
        );
    }
    record
}

fn create_rules(count: usize) -> Vec<Rule> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                Rule::rename(format!("out.item{}.value", i), format!("field{}.value", i)).unwrap()
            } else {
                RuleBuilder::new(format!("out.item{}.tags", i))
                    .source(format!("field{}.tags", i))
                    .transform(built_in::split_list())
                    .build()
                    .unwrap()
            }
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for size in [10usize, 100, 1000] {
        let record = create_record(size);
        let rules = create_rules(size);

        group.bench_with_input(BenchmarkId::new("discard", size), &size, |b, _| {
            b.iter(|| normalize(black_box(&record), black_box(&rules), false).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("preserve", size), &size, |b, _| {
            b.iter(|| normalize(black_box(&record), black_box(&rules), true).unwrap())
        });
    }

    group.finish();
}

fn bench_path_access(c: &mut Criterion) {
    let data = json!({"a": {"b": {"c": {"d": [1, 2, {"e": "deep"}]}}}});

    c.bench_function("path_get_deep", |b| {
        b.iter(|| path::get(black_box(&data), black_box("a.b.c.d.2.e")))
    });

    c.bench_function("path_set_deep", |b| {
        b.iter(|| {
            let mut target = Value::Object(Default::default());
            path::set(&mut target, black_box("a.b.c.d.2.e"), json!("deep")).unwrap();
            target
        })
    });
}

criterion_group!(benches, bench_normalize, bench_path_access);
criterion_main!(benches);
