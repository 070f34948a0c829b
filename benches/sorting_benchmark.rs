use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use duosort::prelude::*;
use rand::Rng;
use std::hint::black_box;

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random i64");
    group.sample_size(20);

    let mut rng = rand::rng();
    let count = 100_000;
    let data: Vec<i64> = (0..count).map(|_| rng.random()).collect();

    group.bench_function("duosort", |b| {
        b.iter_batched(
            || data.clone(),
            |mut data| sort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || data.clone(),
            |mut data| data.sort(),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || data.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_structured(c: &mut Criterion) {
    let mut group = c.benchmark_group("Structured i64");
    group.sample_size(20);

    let mut rng = rand::rng();
    let count = 100_000;

    // Nearly sorted: a few random swaps over an ascending sequence.
    let mut nearly_sorted: Vec<i64> = (0..count as i64).collect();
    for _ in 0..count / 100 {
        let i = rng.random_range(0..count);
        let j = rng.random_range(0..count);
        nearly_sorted.swap(i, j);
    }

    let reverse: Vec<i64> = (0..count as i64).rev().collect();

    for (name, data) in [("nearly_sorted", nearly_sorted), ("reverse", reverse)] {
        group.bench_function(format!("duosort/{name}"), |b| {
            b.iter_batched(
                || data.clone(),
                |mut data| sort(black_box(&mut data)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("slice::sort_unstable/{name}"), |b| {
            b.iter_batched(
                || data.clone(),
                |mut data| data.sort_unstable(),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_narrow_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("Narrow keys");
    group.sample_size(20);

    let mut rng = rand::rng();
    let count = 100_000;
    let bytes: Vec<u8> = (0..count).map(|_| rng.random()).collect();
    let shorts: Vec<i16> = (0..count).map(|_| rng.random()).collect();

    group.bench_function("duosort/u8", |b| {
        b.iter_batched(
            || bytes.clone(),
            |mut data| sort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort_unstable/u8", |b| {
        b.iter_batched(
            || bytes.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("duosort/i16", |b| {
        b.iter_batched(
            || shorts.clone(),
            |mut data| sort(black_box(&mut data)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("slice::sort_unstable/i16", |b| {
        b.iter_batched(
            || shorts.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_random, bench_structured, bench_narrow_keys);
criterion_main!(benches);
