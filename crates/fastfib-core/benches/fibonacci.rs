//! Criterion benchmarks: fast doubling against the O(n) additive loop.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigUint;

use fastfib_core::calculator::{Calculator, FibCalculator};
use fastfib_core::options::Options;

fn additive(n: u64) -> BigUint {
    let mut a = BigUint::ZERO;
    let mut b = BigUint::from(1u32);
    for _ in 0..n {
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }
    a
}

fn bench_algorithms(c: &mut Criterion) {
    let calc = FibCalculator::default();
    let opts = Options::unlimited();

    let mut group = c.benchmark_group("FastDoubling");
    for n in [1_000u64, 10_000, 100_000, 1_000_000, 2_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| calc.calculate(n, &opts).unwrap());
        });
    }
    group.finish();

    let mut group = c.benchmark_group("AdditiveLoop");
    for n in [1_000u64, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| additive(n));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_algorithms);
criterion_main!(benches);
