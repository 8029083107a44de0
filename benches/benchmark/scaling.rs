use crate::common::{configure_criterion, seeded_store, user_definition, user_record};
use criterion::{criterion_group, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

pub fn bench_embedded_list_scaling(c: &mut Criterion) {
    let definition = user_definition(seeded_store());
    let mut group = c.benchmark_group("scaling/embedded_list");

    for size in [1, 10, 100, 1000] {
        let attributes = user_record(7, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &attributes, |b, attributes| {
            b.iter(|| {
                let mut validator = definition.validator(attributes.clone());
                validator.validate().expect("store is reachable");
                black_box(validator.into_errors());
            })
        });
    }

    group.finish();
}

criterion_group! {
    name = scaling_benches;
    config = configure_criterion();
    targets = bench_embedded_list_scaling,
}
