//! Criterion benchmarks for the patch decision engine
//!
//! The engine runs once per admitted object on the API server's critical
//! path, so decide + encode should stay in the low microseconds.

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cumulo_webhook::patch::{decide, generate_json_patch};

// =============================================================================
// Test Fixtures
// =============================================================================

fn labels(count: usize, with_managed: bool) -> BTreeMap<String, String> {
    let mut labels: BTreeMap<String, String> = (0..count)
        .map(|i| (format!("app.example.com/label-{i}"), format!("value-{i}")))
        .collect();
    if with_managed {
        labels.insert("cumulo.ai".to_string(), "true".to_string());
    }
    labels
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide");

    for count in [0usize, 10, 100] {
        for with_managed in [false, true] {
            let input = labels(count, with_managed);
            let id = format!("{count}_labels/managed_{with_managed}");
            group.bench_with_input(BenchmarkId::from_parameter(id), &input, |b, input| {
                b.iter(|| decide(black_box(Some(input))))
            });
        }
    }

    group.finish();
}

fn bench_generate_json_patch(c: &mut Criterion) {
    let input = labels(10, true);

    c.bench_function("generate_json_patch", |b| {
        b.iter(|| generate_json_patch(black_box(Some(&input))))
    });
}

criterion_group!(benches, bench_decide, bench_generate_json_patch);
criterion_main!(benches);
