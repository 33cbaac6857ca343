//! Portfolio simulation engine — the per-step cash/holdings state machine.
//!
//! Two traversal strategies share one set of transition rules:
//!
//! - [`scan::simulate`] walks one weight column at a time over all steps
//!   (the reference loop).
//! - [`batched::simulate_batched`] walks time steps in the outer loop and
//!   sweeps every column per step.
//!
//! Both must produce identical results; `buy_quantity` holds the shared
//! mode arithmetic so the strategies can only differ in traversal order.

pub mod batched;
pub mod scan;

pub use batched::simulate_batched;
pub use scan::{scan_column, simulate, ColumnRun};

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::config::{ExecutionMode, SimulationConfig};
use crate::error::EvalError;

/// Full simulation record: one value/cash/quantity cell per step and column.
///
/// Invariant at every `[t, w]`: `value == cash + quantity * price[t]`, with
/// `cash >= 0` and `quantity >= 0`.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub value: Array2<f64>,
    pub cash: Array2<f64>,
    pub quantity: Array2<f64>,
}

impl SimulationOutput {
    /// Allocate zeroed matrices with step 0 initialized to the starting state
    /// (all cash, no holdings).
    pub(crate) fn initialized(t_len: usize, n_cols: usize, initial_cash: f64) -> Self {
        let mut out = Self {
            value: Array2::zeros((t_len, n_cols)),
            cash: Array2::zeros((t_len, n_cols)),
            quantity: Array2::zeros((t_len, n_cols)),
        };
        for w in 0..n_cols {
            out.cash[[0, w]] = initial_cash;
            out.value[[0, w]] = initial_cash;
        }
        out
    }
}

/// Fail-fast validation shared by both engines and the batch evaluator.
///
/// A non-positive or non-finite price would silently corrupt the floor
/// divisions mid-scan, so it is a fatal input error, rejected before any
/// state evolves.
pub fn validate_inputs(
    prices: ArrayView1<f64>,
    executable: ArrayView2<i8>,
    config: &SimulationConfig,
) -> Result<(), EvalError> {
    config.validate()?;

    if prices.is_empty() {
        return Err(EvalError::InvalidInput(
            "price series must contain at least one step".to_string(),
        ));
    }
    if let Some((t, &p)) = prices
        .iter()
        .enumerate()
        .find(|(_, &p)| !p.is_finite() || p <= 0.0)
    {
        return Err(EvalError::InvalidInput(format!(
            "price at step {t} must be positive and finite, got {p}"
        )));
    }
    if executable.nrows() != prices.len() {
        return Err(EvalError::ShapeMismatch {
            expected: prices.len(),
            actual: executable.nrows(),
        });
    }
    Ok(())
}

/// Raw buy quantity for one entry, before the universal affordability cap.
///
/// `cash` and `quantity` are the carried-forward state at the moment the buy
/// fires; `price` is the current step's price (validated positive upstream).
#[inline]
pub(crate) fn buy_quantity(mode: ExecutionMode, cash: f64, quantity: f64, price: f64) -> f64 {
    match mode {
        ExecutionMode::CashAll => (cash / price).floor(),
        ExecutionMode::PortfolioPct { max_allocation_pct } => {
            let portfolio_val = cash + quantity * price;
            let max_position = (portfolio_val * max_allocation_pct / price).floor();
            let affordable = (cash / price).floor();
            (max_position - quantity).min(affordable).max(0.0)
        }
        ExecutionMode::FixedCash { amount } => (amount / price).floor(),
        // Deliberately not floored: the caller owns lot sizing.
        ExecutionMode::FixedSize { size } => size,
    }
}
