//! Error taxonomy for the evaluation pipeline.
//!
//! Every variant is a configuration or programmer error, detected eagerly at
//! call start. Nothing here is transient: callers must not retry, and the
//! pipeline never returns partial results after a failure.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Signal matrix column count does not match weight matrix row count.
    #[error("signal matrix has {signal_cols} columns but weight matrix has {weight_rows} rows")]
    DimensionMismatch {
        signal_cols: usize,
        weight_rows: usize,
    },

    /// Position matrix row count does not match the price series length.
    #[error("position matrix has {actual} rows but price series has {expected} steps")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Unrecognized execution-mode tag (string parsing only; enum dispatch is total).
    #[error("unsupported execution mode: {0:?}")]
    UnsupportedMode(String),

    /// A configuration parameter is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An input array violates a precondition the simulator cannot recover from.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
