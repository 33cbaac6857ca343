//! Reference engine: one sequential scan per weight column.
//!
//! The per-step recurrence is strictly sequential in t, so there is no
//! intra-column parallelism; columns are mutually independent, which is what
//! the batch evaluator exploits when it fans columns out across a worker
//! pool.

use ndarray::{ArrayView1, ArrayView2};

use crate::config::SimulationConfig;
use crate::engine::{buy_quantity, validate_inputs, SimulationOutput};
use crate::error::EvalError;

/// Per-column simulation trace, owned by exactly one worker.
#[derive(Debug, Clone)]
pub struct ColumnRun {
    pub value: Vec<f64>,
    pub cash: Vec<f64>,
    pub quantity: Vec<f64>,
}

/// Walk a single executable-position column over the whole price series.
///
/// Inputs must already have passed [`validate_inputs`]; this function is the
/// hot inner loop and performs no checks of its own.
///
/// Transitions per step t >= 1, driven by `change = position[t] - position[t-1]`:
/// - `change > 0`: buy. Mode-specific raw quantity, then capped at
///   `floor(cash / price)` so cash can never go negative.
/// - `change < 0`: full liquidation at the current price. Partial sells are
///   not modeled, and quantity never goes below zero — the short state only
///   exits an existing long.
/// - `change == 0`: carry the previous cash and quantity forward.
///
/// Value is recorded after the branch, at the current step's price.
pub fn scan_column(
    prices: ArrayView1<f64>,
    positions: ArrayView1<i8>,
    config: &SimulationConfig,
) -> ColumnRun {
    let t_len = prices.len();
    let mut value = vec![0.0; t_len];
    let mut cash = vec![0.0; t_len];
    let mut quantity = vec![0.0; t_len];

    let mut cur_cash = config.initial_cash;
    let mut cur_qty = 0.0;
    cash[0] = cur_cash;
    value[0] = cur_cash;

    for t in 1..t_len {
        let price = prices[t];
        let change = positions[t] - positions[t - 1];

        if change > 0 {
            let affordable = (cur_cash / price).floor();
            let buy = buy_quantity(config.mode, cur_cash, cur_qty, price).min(affordable);
            cur_cash -= buy * price;
            cur_qty += buy;
        } else if change < 0 {
            cur_cash += cur_qty * price;
            cur_qty = 0.0;
        }

        cash[t] = cur_cash;
        quantity[t] = cur_qty;
        value[t] = cur_cash + cur_qty * price;
    }

    ColumnRun {
        value,
        cash,
        quantity,
    }
}

/// Simulate every column of `executable` against `prices`.
///
/// This is the reference strategy; [`super::simulate_batched`] must agree
/// with it to the last bit.
pub fn simulate(
    prices: ArrayView1<f64>,
    executable: ArrayView2<i8>,
    config: &SimulationConfig,
) -> Result<SimulationOutput, EvalError> {
    validate_inputs(prices, executable, config)?;

    let (t_len, n_cols) = executable.dim();
    let mut out = SimulationOutput::initialized(t_len, n_cols, config.initial_cash);

    for w in 0..n_cols {
        let run = scan_column(prices, executable.column(w), config);
        for t in 0..t_len {
            out.value[[t, w]] = run.value[t];
            out.cash[[t, w]] = run.cash[t];
            out.quantity[[t, w]] = run.quantity[t];
        }
    }

    Ok(out)
}
