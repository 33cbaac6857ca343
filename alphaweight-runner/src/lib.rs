//! alphaweight runner — batch scoring on top of `alphaweight-core`.
//!
//! This crate provides:
//! - Pure performance reductions over value curves (Sharpe, max drawdown,
//!   total return, win rate)
//! - The batch evaluator that composes combine → simulate → reduce, with an
//!   optional rayon fan-out over weight columns
//! - Deterministic candidate ranking for the external optimizer
//!
//! Central contract: scoring a single weight column alone equals scoring it
//! inside any larger batch, so callers may split, reorder, or chunk columns
//! across workers without affecting results.

pub mod evaluate;
pub mod metrics;

pub use evaluate::{rank_candidates, BatchEvaluator, EvalReport};
pub use metrics::{
    max_drawdown, sharpe_ratio, step_returns, total_return, win_rate, MetricsBundle,
};
