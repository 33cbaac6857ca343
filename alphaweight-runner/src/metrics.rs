//! Performance metrics — pure reductions over the portfolio value curves.
//!
//! Every metric is a pure function: T×W value matrix in, one scalar per
//! column out. The four reductions are independent of each other and carry
//! no state, so they can run per metric or per column in any order.
//!
//! Numeric conventions shared by all of them:
//! - a value curve touching exactly zero yields a non-finite step return,
//!   which is replaced by 0.0;
//! - denominators carry a 1e-8 epsilon so zero-variance and zero-start
//!   curves reduce to finite scores instead of NaN.

use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

const EPS: f64 = 1e-8;

/// All four reductions for a batch, one entry per weight column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsBundle {
    pub sharpe: Array1<f64>,
    pub max_drawdown: Array1<f64>,
    pub total_return: Array1<f64>,
    pub win_rate: Array1<f64>,
}

impl MetricsBundle {
    /// Compute all metrics from a value matrix.
    pub fn compute(value: ArrayView2<f64>, annualization_factor: f64) -> Self {
        Self {
            sharpe: sharpe_ratio(value, annualization_factor),
            max_drawdown: max_drawdown(value),
            total_return: total_return(value),
            win_rate: win_rate(value),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Per-step simple returns, (T-1)×W: `value[t+1] / value[t] - 1`.
///
/// Non-finite entries (a curve hitting exactly zero) become 0.0.
pub fn step_returns(value: ArrayView2<f64>) -> Array2<f64> {
    let (t_len, n_cols) = value.dim();
    if t_len < 2 {
        return Array2::zeros((0, n_cols));
    }
    let mut returns = Array2::zeros((t_len - 1, n_cols));
    for t in 0..t_len - 1 {
        for w in 0..n_cols {
            let r = value[[t + 1, w]] / value[[t, w]] - 1.0;
            returns[[t, w]] = if r.is_finite() { r } else { 0.0 };
        }
    }
    returns
}

/// Annualized Sharpe ratio per column.
///
/// `mean(returns) / (sample_std(returns) + 1e-8) * sqrt(annualization_factor)`,
/// sample std with divisor n-1 where n = T-1. Fewer than two returns, or a
/// non-finite result, yields 0.0.
pub fn sharpe_ratio(value: ArrayView2<f64>, annualization_factor: f64) -> Array1<f64> {
    let returns = step_returns(value);
    let n = returns.nrows();
    let n_cols = value.ncols();
    let mut out = Array1::zeros(n_cols);
    if n < 2 {
        return out;
    }

    let scale = annualization_factor.sqrt();
    for w in 0..n_cols {
        let col = returns.column(w);
        let mean = col.sum() / n as f64;
        let var = col.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / (n - 1) as f64;
        let sharpe = mean / (var.sqrt() + EPS) * scale;
        out[w] = if sharpe.is_finite() { sharpe } else { 0.0 };
    }
    out
}

/// Maximum peak-to-trough drawdown per column, as a non-negative fraction.
///
/// Single forward scan: track the running peak; whenever the value does not
/// make a new peak, accumulate `(peak - value) / (peak + 1e-8)` and keep the
/// largest.
pub fn max_drawdown(value: ArrayView2<f64>) -> Array1<f64> {
    let (t_len, n_cols) = value.dim();
    let mut out = Array1::zeros(n_cols);
    if t_len == 0 {
        return out;
    }

    for w in 0..n_cols {
        let mut peak = value[[0, w]];
        let mut max_dd = 0.0_f64;
        for t in 1..t_len {
            let v = value[[t, w]];
            if v > peak {
                peak = v;
            } else {
                let dd = (peak - v) / (peak + EPS);
                if dd > max_dd {
                    max_dd = dd;
                }
            }
        }
        out[w] = max_dd;
    }
    out
}

/// Total return per column: `value[T-1] / (value[0] + 1e-8) - 1`.
pub fn total_return(value: ArrayView2<f64>) -> Array1<f64> {
    let (t_len, n_cols) = value.dim();
    let mut out = Array1::zeros(n_cols);
    if t_len == 0 {
        return out;
    }

    for w in 0..n_cols {
        let r = value[[t_len - 1, w]] / (value[[0, w]] + EPS) - 1.0;
        out[w] = if r.is_finite() { r } else { 0.0 };
    }
    out
}

/// Fraction of strictly positive step returns per column, in [0, 1].
pub fn win_rate(value: ArrayView2<f64>) -> Array1<f64> {
    let returns = step_returns(value);
    let n = returns.nrows();
    let n_cols = value.ncols();
    let mut out = Array1::zeros(n_cols);
    if n == 0 {
        return out;
    }

    for w in 0..n_cols {
        let wins = returns.column(w).iter().filter(|&&r| r > 0.0).count();
        out[w] = wins as f64 / n as f64;
    }
    out
}
