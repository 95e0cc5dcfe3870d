// ============================================================================
// Arithmetic Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Multiplication - Schoolbook vs Karatsuba across the limb cutoff
// 2. Division - Long division at growing scales
// 3. Roots and Powers - Newton square root and squaring loops
// 4. Base Conversion - Parsing and printing outside base 10
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use decimal_engine::numeric::{self, Notation};
use decimal_engine::prelude::*;
use std::hint::black_box;

/// A number with `digits` decimal digits cycling through 1-9.
fn digits(digits: usize) -> Number {
    let text: String = (0..digits)
        .map(|i| char::from(b'1' + (i % 9) as u8))
        .collect();
    text.parse().unwrap()
}

// ============================================================================
// Multiplication Benchmarks
// Operand sizes straddle the Karatsuba cutoff (32 limbs = 288 digits)
// ============================================================================

fn benchmark_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");

    for num_digits in [9, 90, 270, 300, 900, 2700].iter() {
        let a = digits(*num_digits);
        let b = digits(*num_digits);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_digits),
            &(&a, &b),
            |bench, (a, b)| {
                let mut out = Number::new();
                bench.iter(|| {
                    numeric::mul(a, b, &mut out, 0, &NeverInterrupt).unwrap();
                    black_box(&out);
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Division Benchmarks
// ============================================================================

fn benchmark_divide(c: &mut Criterion) {
    let mut group = c.benchmark_group("divide");

    let a = digits(200);
    let b = digits(50);

    for scale in [0, 20, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(scale), scale, |bench, &scale| {
            let mut out = Number::new();
            bench.iter(|| {
                numeric::div(&a, &b, &mut out, scale, &NeverInterrupt).unwrap();
                black_box(&out);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Root and Power Benchmarks
// ============================================================================

fn benchmark_sqrt(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqrt");
    let two = Number::from_u64(2);

    for scale in [10, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(scale), scale, |bench, &scale| {
            let mut out = Number::new();
            bench.iter(|| {
                numeric::sqrt(&two, &mut out, scale, &NeverInterrupt).unwrap();
                black_box(&out);
            });
        });
    }

    group.finish();
}

fn benchmark_pow(c: &mut Criterion) {
    c.bench_function("pow_3_1000", |bench| {
        let base = Number::from_u64(3);
        let exponent = Number::from_u64(1000);
        let mut out = Number::new();
        bench.iter(|| {
            numeric::pow(&base, &exponent, &mut out, 0, &NeverInterrupt).unwrap();
            black_box(&out);
        });
    });
}

// ============================================================================
// Base Conversion Benchmarks
// ============================================================================

fn benchmark_base_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("base_conversion");
    let n = digits(500);

    for base in [2, 16, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("print", base), base, |bench, &base| {
            bench.iter(|| {
                black_box(numeric::to_string_with(&n, Notation::Base(base), &NeverInterrupt).unwrap());
            });
        });
    }

    let hex = "F".repeat(400);
    group.bench_function("parse_hex", |bench| {
        bench.iter(|| black_box(numeric::parse(&hex, 16, false, &NeverInterrupt).unwrap()));
    });

    group.bench_function("parse_decimal", |bench| {
        let text = n.to_string();
        bench.iter(|| black_box(numeric::parse(&text, 10, false, &NeverInterrupt).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_multiply,
    benchmark_divide,
    benchmark_sqrt,
    benchmark_pow,
    benchmark_base_conversion,
);
criterion_main!(benches);
