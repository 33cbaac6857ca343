//! Serializable simulation configuration.
//!
//! Everything the simulator needs arrives in one explicit value per call.
//! There is no process-wide state and no module-level defaults: the caller
//! owns every parameter.

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Buy-sizing policy, fixed for an entire simulation run.
///
/// Each variant carries its own parameters; dispatch is a pattern match, so
/// there is no fallback branch to mis-trigger. The serde representation uses
/// the original wire tags (`cash_all`, `portfolio_pct`, `fixed_cash`,
/// `fixed`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Spend all available cash: `floor(cash / price)`.
    CashAll,

    /// Cap the position at a fraction of current portfolio value.
    PortfolioPct { max_allocation_pct: f64 },

    /// Spend a fixed cash amount per entry: `floor(amount / price)`.
    FixedCash { amount: f64 },

    /// Buy a fixed quantity per entry.
    ///
    /// The quantity is not re-floored; the caller is responsible for passing
    /// a whole-lot size. The universal affordability cap still applies.
    #[serde(rename = "fixed")]
    FixedSize { size: f64 },
}

impl ExecutionMode {
    /// Map a wire tag plus its sizing parameter onto a mode.
    ///
    /// `param` is `max_allocation_pct`, `amount`, or `size` depending on the
    /// tag; `cash_all` takes no parameter and ignores it. Unknown tags fail
    /// with [`EvalError::UnsupportedMode`] — there is no default mode.
    pub fn from_tag(tag: &str, param: f64) -> Result<Self, EvalError> {
        match tag {
            "cash_all" => Ok(Self::CashAll),
            "portfolio_pct" => Ok(Self::PortfolioPct {
                max_allocation_pct: param,
            }),
            "fixed_cash" => Ok(Self::FixedCash { amount: param }),
            "fixed" => Ok(Self::FixedSize { size: param }),
            other => Err(EvalError::UnsupportedMode(other.to_string())),
        }
    }

    /// The wire tag for this mode.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::CashAll => "cash_all",
            Self::PortfolioPct { .. } => "portfolio_pct",
            Self::FixedCash { .. } => "fixed_cash",
            Self::FixedSize { .. } => "fixed",
        }
    }

    fn validate(&self) -> Result<(), EvalError> {
        match *self {
            Self::CashAll => Ok(()),
            Self::PortfolioPct { max_allocation_pct } => {
                if !max_allocation_pct.is_finite()
                    || max_allocation_pct <= 0.0
                    || max_allocation_pct > 1.0
                {
                    return Err(EvalError::InvalidConfig(format!(
                        "max_allocation_pct must be in (0, 1], got {max_allocation_pct}"
                    )));
                }
                Ok(())
            }
            Self::FixedCash { amount } => {
                if !amount.is_finite() || amount <= 0.0 {
                    return Err(EvalError::InvalidConfig(format!(
                        "fixed_cash amount must be positive, got {amount}"
                    )));
                }
                Ok(())
            }
            Self::FixedSize { size } => {
                if !size.is_finite() || size <= 0.0 {
                    return Err(EvalError::InvalidConfig(format!(
                        "fixed position size must be positive, got {size}"
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Configuration for one evaluation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Starting cash per weight column. Must be positive.
    pub initial_cash: f64,

    /// Buy-sizing policy.
    pub mode: ExecutionMode,

    /// Signal threshold: combined values strictly above it go long, strictly
    /// below its negation go short, everything else is flat.
    pub threshold: f64,

    /// Sharpe annualization factor (252 for daily bars).
    pub annualization_factor: f64,
}

impl SimulationConfig {
    /// Create a config with a 0.5 threshold and daily annualization.
    pub fn new(initial_cash: f64, mode: ExecutionMode) -> Self {
        Self {
            initial_cash,
            mode,
            threshold: 0.5,
            annualization_factor: 252.0,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_annualization(mut self, annualization_factor: f64) -> Self {
        self.annualization_factor = annualization_factor;
        self
    }

    /// Check every parameter range. Called once at the start of an
    /// evaluation; nothing downstream re-validates.
    pub fn validate(&self) -> Result<(), EvalError> {
        if !self.initial_cash.is_finite() || self.initial_cash <= 0.0 {
            return Err(EvalError::InvalidConfig(format!(
                "initial_cash must be positive, got {}",
                self.initial_cash
            )));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(EvalError::InvalidConfig(format!(
                "threshold must be non-negative, got {}",
                self.threshold
            )));
        }
        if !self.annualization_factor.is_finite() || self.annualization_factor <= 0.0 {
            return Err(EvalError::InvalidConfig(format!(
                "annualization_factor must be positive, got {}",
                self.annualization_factor
            )));
        }
        self.mode.validate()
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two identical configs hash identically, so an external optimizer can
    /// key result caches on the fingerprint plus its input identifiers.
    pub fn fingerprint(&self) -> String {
        let json =
            serde_json::to_string(self).expect("SimulationConfig serialization cannot fail");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
