//! Criterion benchmarks for the kernel hot paths.
//!
//! Benchmarks:
//! 1. Signal combination (matrix product + threshold + lag)
//! 2. Reference per-column simulation
//! 3. Column-batched simulation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array1, Array2};

use alphaweight_core::engine::{simulate, simulate_batched};
use alphaweight_core::signal::combine_signals;
use alphaweight_core::{ExecutionMode, SimulationConfig};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_prices(t_len: usize) -> Array1<f64> {
    Array1::from_iter((0..t_len).map(|t| 100.0 + (t as f64 * 0.1).sin() * 10.0 + t as f64 * 0.01))
}

fn make_signals(t_len: usize, n_signals: usize) -> Array2<f64> {
    Array2::from_shape_fn((t_len, n_signals), |(t, n)| {
        ((t * 31 + n * 17) as f64 * 0.13).sin()
    })
}

fn make_weights(n_signals: usize, n_cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((n_signals, n_cols), |(n, w)| {
        ((n * 7 + w * 13) as f64 * 0.29).cos()
    })
}

fn make_positions(t_len: usize, n_cols: usize) -> Array2<i8> {
    Array2::from_shape_fn((t_len, n_cols), |(t, w)| {
        if t == 0 {
            0
        } else {
            match (t * (w + 2)) % 7 {
                0 | 4 => 1,
                1 => -1,
                _ => 0,
            }
        }
    })
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine_signals");
    for &(t_len, n_signals, n_cols) in &[(1000, 50, 32), (5000, 100, 64)] {
        let signals = make_signals(t_len, n_signals);
        let weights = make_weights(n_signals, n_cols);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{t_len}x{n_signals}x{n_cols}")),
            &(signals, weights),
            |b, (signals, weights)| {
                b.iter(|| {
                    combine_signals(black_box(signals.view()), black_box(weights.view()), 0.5)
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let cfg = SimulationConfig::new(
        1_000_000.0,
        ExecutionMode::PortfolioPct {
            max_allocation_pct: 0.5,
        },
    );

    for &(t_len, n_cols) in &[(1000, 32), (10_000, 64)] {
        let prices = make_prices(t_len);
        let exec = make_positions(t_len, n_cols);

        group.bench_with_input(
            BenchmarkId::new("per_column", format!("{t_len}x{n_cols}")),
            &(&prices, &exec),
            |b, (prices, exec)| {
                b.iter(|| simulate(black_box(prices.view()), black_box(exec.view()), &cfg).unwrap())
            },
        );
        group.bench_with_input(
            BenchmarkId::new("batched", format!("{t_len}x{n_cols}")),
            &(&prices, &exec),
            |b, (prices, exec)| {
                b.iter(|| {
                    simulate_batched(black_box(prices.view()), black_box(exec.view()), &cfg)
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_combine, bench_engines);
criterion_main!(benches);
