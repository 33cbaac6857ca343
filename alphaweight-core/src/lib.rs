//! alphaweight core — the scoring pipeline's computational kernel.
//!
//! Four stages, strictly ordered:
//! 1. Signal combination: weighted blend of raw alphas, thresholded into a
//!    tri-state position with a one-step execution lag ([`signal`]).
//! 2. Portfolio simulation: per-step cash/holdings state machine under one
//!    of four buy-sizing policies ([`engine`]).
//!
//! Metrics reduction and batch orchestration live in `alphaweight-runner`.
//!
//! The kernel is deterministic and free of hidden state: identical inputs
//! and configuration produce identical outputs, and weight columns are
//! mutually independent, so callers may split or reorder them freely.

pub mod config;
pub mod engine;
pub mod error;
pub mod signal;

pub use config::{ExecutionMode, SimulationConfig};
pub use engine::{simulate, simulate_batched, SimulationOutput};
pub use error::EvalError;
pub use signal::{combine_signals, CombinedSignal};
