use crate::common::{configure_criterion, realistic_users, seeded_store, user_definition};
use criterion::{criterion_group, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use validation_rail::prelude::*;

pub fn bench_nested_validation(c: &mut Criterion) {
    let definition = user_definition(seeded_store());
    let users = realistic_users();

    let mut group = c.benchmark_group("validation");

    group.bench_function("validate_nested_user", |b| {
        b.iter(|| {
            let mut validator = definition.validator(users[0].clone());
            let valid = validator.is_valid().expect("store is reachable");
            black_box((valid, validator.errors().error_count()));
        })
    });

    group.bench_function("call_batch_of_100", |b| {
        b.iter(|| {
            let invalid = users
                .iter()
                .filter(|user| definition.call((*user).clone()).is_err())
                .count();
            black_box(invalid);
        })
    });

    group.bench_function("full_messages", |b| {
        let mut validator = definition.validator(users[0].clone());
        validator.validate().expect("store is reachable");
        b.iter(|| black_box(validator.errors().full_messages()))
    });

    group.finish();
}

pub fn bench_definition_build(c: &mut Criterion) {
    let store: Arc<dyn UniquenessStore> = seeded_store();

    c.bench_function("definition/build_with_registry", |b| {
        b.iter(|| black_box(user_definition(Arc::clone(&store))))
    });
}

criterion_group! {
    name = validation_benches;
    config = configure_criterion();
    targets =
        bench_nested_validation,
        bench_definition_build,
}
