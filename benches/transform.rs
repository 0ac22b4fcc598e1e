//! Transform hot path benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nrexport_lib::core::{KeyValue, ServiceName};
use nrexport_lib::metrics::{
    build_attributes, transform, AggregationRecord, Aggregator, Descriptor, Labels, Number,
    NumberKind, Resource,
};

fn record(labels: usize, aggregator: Aggregator) -> AggregationRecord {
    let descriptor = Descriptor::new("http.server.duration", NumberKind::Float64)
        .with_unit("ms")
        .with_description("Inbound request latency")
        .with_resource(Resource::new([
            KeyValue::new("host.name", "web-1"),
            KeyValue::new("process.pid", 4242_i64),
        ]));
    let labels: Labels = (0..labels)
        .map(|i| KeyValue::new(format!("label.{i}"), format!("value-{i}")))
        .collect();
    AggregationRecord::new(descriptor, labels, aggregator)
}

fn bench_transform(c: &mut Criterion) {
    let service = ServiceName::new("checkout").unwrap();
    let mut group = c.benchmark_group("transform");

    let sum = record(4, Aggregator::sum(Number::from_f64(42.0)));
    group.bench_function("sum", |b| {
        b.iter(|| black_box(transform(&service, black_box(&sum))));
    });

    let summary = record(
        4,
        Aggregator::min_max_sum_count(
            Number::from_f64(1.0),
            Number::from_f64(9.0),
            Number::from_f64(20.0),
            5,
        ),
    );
    group.bench_function("min_max_sum_count", |b| {
        b.iter(|| black_box(transform(&service, black_box(&summary))));
    });

    group.finish();
}

fn bench_build_attributes(c: &mut Criterion) {
    let service = ServiceName::new("checkout").unwrap();
    let mut group = c.benchmark_group("build_attributes");

    for labels in [0, 8, 64] {
        let rec = record(labels, Aggregator::sum(Number::from_f64(1.0)));
        group.bench_with_input(BenchmarkId::from_parameter(labels), &rec, |b, rec| {
            b.iter(|| black_box(build_attributes(&service, rec.descriptor(), rec.labels())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transform, bench_build_attributes);
criterion_main!(benches);
