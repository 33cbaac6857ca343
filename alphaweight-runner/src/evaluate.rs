//! Batch evaluation: score a batch of candidate weight columns in one call.
//!
//! Pipeline per call: combine signals → simulate portfolios → reduce to
//! Sharpe scores. Columns are mutually independent, so the parallel path
//! fans per-column scans out over rayon with each worker writing only its
//! own column trace; the sequential path runs the column-batched engine.
//! Both paths produce identical results for identical inputs.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rayon::prelude::*;

use alphaweight_core::engine::{scan_column, simulate_batched, validate_inputs, SimulationOutput};
use alphaweight_core::signal::combine_signals;
use alphaweight_core::{EvalError, SimulationConfig};

use crate::metrics::{self, MetricsBundle};

/// Everything the with-metrics variant hands back: intermediate matrices
/// plus the per-column metrics bundle.
#[derive(Debug, Clone)]
pub struct EvalReport {
    /// Weighted signal blend, T×W.
    pub combined: Array2<f64>,
    /// Directional state before the lag, T×W in {-1, 0, +1}.
    pub state: Array2<i8>,
    /// Tradable position after the lag, T×W.
    pub executable: Array2<i8>,
    /// Portfolio value, cash, and holdings traces, each T×W.
    pub value: Array2<f64>,
    pub cash: Array2<f64>,
    pub quantity: Array2<f64>,
    pub metrics: MetricsBundle,
}

/// Scores candidate weight columns against one price/signal history.
///
/// Holds the immutable configuration for the run; the evaluator itself owns
/// no state between calls and is safe to share across threads.
#[derive(Debug, Clone)]
pub struct BatchEvaluator {
    config: SimulationConfig,
    parallel: bool,
}

impl BatchEvaluator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            parallel: true,
        }
    }

    /// Enables or disables the rayon fan-out over columns.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Score every weight column: one annualized Sharpe ratio per column.
    ///
    /// All validation — configuration ranges, the signal/weight inner
    /// dimension, price positivity — happens before any simulation work, so
    /// a bad call fails fast with no partial computation.
    pub fn evaluate(
        &self,
        weights: ArrayView2<f64>,
        signals: ArrayView2<f64>,
        prices: ArrayView1<f64>,
    ) -> Result<Array1<f64>, EvalError> {
        self.config.validate()?;
        let combined = combine_signals(signals, weights, self.config.threshold)?;
        let output = self.run_engine(prices, combined.executable.view())?;
        Ok(metrics::sharpe_ratio(
            output.value.view(),
            self.config.annualization_factor,
        ))
    }

    /// Score one weight vector; must agree with scoring it inside a batch.
    pub fn evaluate_single(
        &self,
        weight: ArrayView1<f64>,
        signals: ArrayView2<f64>,
        prices: ArrayView1<f64>,
    ) -> Result<f64, EvalError> {
        let column = weight.insert_axis(Axis(1));
        let scores = self.evaluate(column, signals, prices)?;
        Ok(scores[0])
    }

    /// Full pipeline output: every intermediate matrix plus all four metrics.
    pub fn evaluate_with_metrics(
        &self,
        weights: ArrayView2<f64>,
        signals: ArrayView2<f64>,
        prices: ArrayView1<f64>,
    ) -> Result<EvalReport, EvalError> {
        self.config.validate()?;
        let combined = combine_signals(signals, weights, self.config.threshold)?;
        let output = self.run_engine(prices, combined.executable.view())?;
        let metrics = MetricsBundle::compute(output.value.view(), self.config.annualization_factor);

        Ok(EvalReport {
            combined: combined.combined,
            state: combined.state,
            executable: combined.executable,
            value: output.value,
            cash: output.cash,
            quantity: output.quantity,
            metrics,
        })
    }

    fn run_engine(
        &self,
        prices: ArrayView1<f64>,
        executable: ArrayView2<i8>,
    ) -> Result<SimulationOutput, EvalError> {
        if !self.parallel {
            return simulate_batched(prices, executable, &self.config);
        }

        validate_inputs(prices, executable, &self.config)?;
        let (t_len, n_cols) = executable.dim();

        let runs: Vec<_> = (0..n_cols)
            .into_par_iter()
            .map(|w| scan_column(prices, executable.column(w), &self.config))
            .collect();

        let mut value = Array2::zeros((t_len, n_cols));
        let mut cash = Array2::zeros((t_len, n_cols));
        let mut quantity = Array2::zeros((t_len, n_cols));
        for (w, run) in runs.iter().enumerate() {
            for t in 0..t_len {
                value[[t, w]] = run.value[t];
                cash[[t, w]] = run.cash[t];
                quantity[[t, w]] = run.quantity[t];
            }
        }

        Ok(SimulationOutput {
            value,
            cash,
            quantity,
        })
    }
}

/// Candidate indices ordered by descending score, NaN scores last.
///
/// The sort is stable, so ties keep their original order and the ranking is
/// deterministic.
pub fn rank_candidates(scores: ArrayView1<f64>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| {
        let ka = if scores[a].is_nan() {
            f64::NEG_INFINITY
        } else {
            scores[a]
        };
        let kb = if scores[b].is_nan() {
            f64::NEG_INFINITY
        } else {
            scores[b]
        };
        kb.partial_cmp(&ka).expect("keys are never NaN")
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn rank_candidates_descending_with_nan_last() {
        let scores = array![0.5, f64::NAN, 2.0, -1.0, 2.0];
        let ranked = rank_candidates(scores.view());
        assert_eq!(ranked, vec![2, 4, 0, 3, 1]);
    }

    #[test]
    fn rank_candidates_empty() {
        let scores = Array1::<f64>::zeros(0);
        assert!(rank_candidates(scores.view()).is_empty());
    }
}
