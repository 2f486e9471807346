// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pcav_fixed_point::{Decode, Encode, EncodePolicy, NcoAngleWord, formats};
use std::hint::black_box;

fn raw_words(n: u32) -> impl Iterator<Item = u32> {
    (0..n).map(|i| i.wrapping_mul(0x9E37_79B9))
}

fn bench_decode(c: &mut Criterion) {
    let words: Vec<u32> = raw_words(1024).collect();

    let mut group = c.benchmark_group("decode");
    for format in formats::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(format),
            &words,
            |b, words| {
                b.iter(|| {
                    for &raw in words {
                        black_box(format.decode(raw));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let values: Vec<f64> = (0..1024).map(|i| (i as f64 - 512.0) / 513.0).collect();

    let mut group = c.benchmark_group("encode");
    for policy in [EncodePolicy::Wrap, EncodePolicy::Strict] {
        group.bench_with_input(
            BenchmarkId::new("S18_17", format!("{policy:?}")),
            &values,
            |b, values| {
                b.iter(|| {
                    for &value in values {
                        let _ = black_box(policy.encode(&formats::S18_17, value));
                    }
                });
            },
        );
    }
    group.bench_function("nco_angle", |b| {
        b.iter(|| {
            for &value in &values {
                black_box(NcoAngleWord.encode(value * 1.7e7));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
