//! Benchmarks for expanding and compiling gate circuits.
//!
//! Run with:
//! ```bash
//! cargo bench --bench compile
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use qubo_logic::expr::Expr;
use qubo_logic::gate::{and, or, xor};
use qubo_logic::poly::Polynomial;
use qubo_logic::types::{Sample, Var};

/// Parity of `n` inputs as a chain of XOR gates.
fn parity(n: usize) -> Expr {
    let vars: Vec<Expr> = (0..n).map(|i| Expr::binary(format!("x{}", i))).collect();
    vars[1..].iter().fold(vars[0].clone(), |acc, x| xor(&acc, x))
}

/// Ripple of AND/OR gates: high-degree polynomials that need reduction.
fn ripple(n: usize) -> Expr {
    let vars: Vec<Expr> = (0..n).map(|i| Expr::binary(format!("x{}", i))).collect();
    let mut acc = vars[0].clone();
    for (i, x) in vars[1..].iter().enumerate() {
        acc = if i % 2 == 0 { and(&acc, x) } else { or(&acc, x) };
    }
    acc
}

// ============================================================================
// Benchmark: Evaluation
// ============================================================================

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("expr/eval");

    for n in [16, 64, 256] {
        let f = parity(n);
        let sample: Sample = (0..n).map(|i| (Var::new(format!("x{}", i)), i % 2 == 0)).collect();
        group.bench_with_input(BenchmarkId::new("parity", n), &sample, |b, sample| {
            b.iter(|| f.eval(sample).unwrap());
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Expansion
// ============================================================================

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("poly/expand");

    for n in [4, 6, 8] {
        let f = ripple(n);
        group.bench_with_input(BenchmarkId::new("ripple", n), &f, |b, f| {
            b.iter(|| Polynomial::from_expr(f));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Compilation (with degree reduction)
// ============================================================================

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for n in [4, 6, 8] {
        let f = ripple(n);
        group.bench_with_input(BenchmarkId::new("ripple", n), &f, |b, f| {
            b.iter(|| f.compile().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_eval, bench_expand, bench_compile);
criterion_main!(benches);
