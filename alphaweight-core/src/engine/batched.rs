//! Column-batched engine: time steps in the outer loop, a sweep across all
//! weight columns per step.
//!
//! Same transition rules as the reference scan (shared via
//! [`super::buy_quantity`]); only the traversal order differs. Row-major
//! output writes make this the cache-friendly choice when one thread scores
//! a wide batch.

use ndarray::{ArrayView1, ArrayView2};

use crate::config::SimulationConfig;
use crate::engine::{buy_quantity, validate_inputs, SimulationOutput};
use crate::error::EvalError;

/// Simulate all columns of `executable` in one forward pass over the steps.
///
/// Produces results identical to [`super::simulate`] for the same inputs.
pub fn simulate_batched(
    prices: ArrayView1<f64>,
    executable: ArrayView2<i8>,
    config: &SimulationConfig,
) -> Result<SimulationOutput, EvalError> {
    validate_inputs(prices, executable, config)?;

    let (t_len, n_cols) = executable.dim();
    let mut out = SimulationOutput::initialized(t_len, n_cols, config.initial_cash);

    let mut cur_cash = vec![config.initial_cash; n_cols];
    let mut cur_qty = vec![0.0; n_cols];

    for t in 1..t_len {
        let price = prices[t];
        let row = executable.row(t);
        let prev = executable.row(t - 1);

        for w in 0..n_cols {
            let change = row[w] - prev[w];

            if change > 0 {
                let affordable = (cur_cash[w] / price).floor();
                let buy =
                    buy_quantity(config.mode, cur_cash[w], cur_qty[w], price).min(affordable);
                cur_cash[w] -= buy * price;
                cur_qty[w] += buy;
            } else if change < 0 {
                cur_cash[w] += cur_qty[w] * price;
                cur_qty[w] = 0.0;
            }

            out.cash[[t, w]] = cur_cash[w];
            out.quantity[[t, w]] = cur_qty[w];
            out.value[[t, w]] = cur_cash[w] + cur_qty[w] * price;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionMode;
    use crate::engine::simulate;
    use ndarray::{array, Array1, Array2};

    /// Deterministic synthetic fixture: drifting sine prices and a tri-state
    /// position grid that exercises every transition.
    fn fixture(t_len: usize, n_cols: usize) -> (Array1<f64>, Array2<i8>) {
        let prices =
            Array1::from_iter((0..t_len).map(|t| 100.0 + (t as f64 * 0.7).sin() * 20.0 + t as f64 * 0.05));
        let mut exec = Array2::<i8>::zeros((t_len, n_cols));
        for t in 1..t_len {
            for w in 0..n_cols {
                exec[[t, w]] = match (t * (w + 2) + w) % 5 {
                    0 | 3 => 1,
                    1 => -1,
                    _ => 0,
                };
            }
        }
        (prices, exec)
    }

    #[test]
    fn matches_reference_scan_in_every_mode() {
        let (prices, exec) = fixture(60, 7);
        let modes = [
            ExecutionMode::CashAll,
            ExecutionMode::PortfolioPct {
                max_allocation_pct: 0.5,
            },
            ExecutionMode::FixedCash { amount: 25_000.0 },
            ExecutionMode::FixedSize { size: 100.0 },
        ];

        for mode in modes {
            let cfg = SimulationConfig::new(1_000_000.0, mode);
            let a = simulate(prices.view(), exec.view(), &cfg).unwrap();
            let b = simulate_batched(prices.view(), exec.view(), &cfg).unwrap();
            assert_eq!(a.value, b.value, "mode {:?}", mode.tag());
            assert_eq!(a.cash, b.cash);
            assert_eq!(a.quantity, b.quantity);
        }
    }

    #[test]
    fn scenario_a_holds_in_the_batched_engine() {
        let prices = array![100.0, 110.0, 90.0];
        let mut exec = Array2::<i8>::zeros((3, 1));
        exec[[1, 0]] = 1;
        let cfg = SimulationConfig::new(1000.0, ExecutionMode::CashAll);

        let out = simulate_batched(prices.view(), exec.view(), &cfg).unwrap();
        assert_eq!(out.value.column(0).to_vec(), vec![1000.0, 1000.0, 820.0]);
    }

    #[test]
    fn rejects_shape_mismatch_before_scanning() {
        let prices = array![100.0, 110.0];
        let exec = Array2::<i8>::zeros((3, 1));
        let cfg = SimulationConfig::new(1000.0, ExecutionMode::CashAll);
        assert!(matches!(
            simulate_batched(prices.view(), exec.view(), &cfg),
            Err(EvalError::ShapeMismatch { .. })
        ));
    }
}
