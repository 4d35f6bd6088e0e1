//! Performance benchmarks for CommandGenerator.
//!
//! Run with: cargo bench -p featctl-domain
//!
//! These benchmarks measure:
//! - Batching throughput over large selections
//! - Cost of permission filtering with varying denial ratios (0%, 25%, 50%)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use featctl_domain::{
    CommandGenerator, FeatureId, FeatureStatus, SubmittedValue, SubmittedValues,
};

fn all_features_on() -> SubmittedValues {
    FeatureId::ALL
        .into_iter()
        .fold(SubmittedValues::new(), |values, feature| {
            values.with(feature, SubmittedValue::On)
        })
}

fn bench_generator_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator_scaling");
    let generator = CommandGenerator::default();
    let submitted = all_features_on();
    let status = FeatureStatus::new();

    for size in [100usize, 1_000, 10_000, 50_000] {
        let objects: Vec<u64> = (0..size as u64).collect();
        let permissions = |_: &str, _: &u64| true;

        group.throughput(Throughput::Elements((size * FeatureId::ALL.len()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &objects, |b, objects| {
            b.iter(|| {
                let batches = generator
                    .generate(&submitted, &status, objects, &permissions)
                    .map(|command| command.objects().len())
                    .sum::<usize>();
                black_box(batches)
            })
        });
    }

    group.finish();
}

fn bench_permission_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("permission_filtering");
    let generator = CommandGenerator::default();
    let submitted = SubmittedValues::new().with(FeatureId::ActiveChecks, SubmittedValue::On);
    let status = FeatureStatus::new();
    let objects: Vec<u64> = (0..10_000).collect();

    for denied_percent in [0u64, 25, 50] {
        let permissions = move |_: &str, object: &u64| object % 100 >= denied_percent;

        group.throughput(Throughput::Elements(objects.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(denied_percent), |b| {
            b.iter(|| {
                let commands = generator
                    .generate(&submitted, &status, &objects, &permissions)
                    .count();
                black_box(commands)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generator_scaling, bench_permission_filtering);
criterion_main!(benches);
