//! Signal combination: weighted alpha blend, thresholding, execution lag.
//!
//! Pure functions over shared read-only inputs; safe to call from any number
//! of threads concurrently.

use ndarray::{Array2, ArrayView2};

use crate::error::EvalError;

/// Output of [`combine_signals`].
#[derive(Debug, Clone)]
pub struct CombinedSignal {
    /// Weighted signal blend, T×W: `signals · weights`.
    pub combined: Array2<f64>,

    /// Directional state per step, T×W in {-1, 0, +1}, before the lag.
    pub state: Array2<i8>,

    /// Tradable position, T×W: row 0 is all zeros, row t is `state` row t-1.
    /// Today's signal informs tomorrow's trade, never today's.
    pub executable: Array2<i8>,
}

/// Blend raw signals with a batch of weight columns and threshold the result
/// into tradable positions.
///
/// * `signals` — T×N raw alpha values.
/// * `weights` — N×W candidate weight columns.
/// * `threshold` — non-negative; values strictly above it map to +1,
///   strictly below its negation to -1, everything else (including values
///   exactly at ±threshold) to 0.
///
/// Fails with [`EvalError::DimensionMismatch`] when the inner dimensions
/// disagree.
pub fn combine_signals(
    signals: ArrayView2<f64>,
    weights: ArrayView2<f64>,
    threshold: f64,
) -> Result<CombinedSignal, EvalError> {
    if signals.ncols() != weights.nrows() {
        return Err(EvalError::DimensionMismatch {
            signal_cols: signals.ncols(),
            weight_rows: weights.nrows(),
        });
    }

    let combined = signals.dot(&weights);
    let (t_len, n_cols) = combined.dim();

    let mut state = Array2::<i8>::zeros((t_len, n_cols));
    for ((t, w), &c) in combined.indexed_iter() {
        state[[t, w]] = if c > threshold {
            1
        } else if c < -threshold {
            -1
        } else {
            0
        };
    }

    // One-step lag: row 0 stays flat, row t carries yesterday's state.
    let mut executable = Array2::<i8>::zeros((t_len, n_cols));
    for t in 1..t_len {
        for w in 0..n_cols {
            executable[[t, w]] = state[[t - 1, w]];
        }
    }

    Ok(CombinedSignal {
        combined,
        state,
        executable,
    })
}
