//! Transaction cost modeling.

use crate::error::ConfigError;

/// Proportional transaction cost charged on turnover.
///
/// The cost of a rebalance is `transaction_cost_bps / 10_000 * turnover`, a
/// fraction of portfolio value deducted from that period's return.
///
/// ```
/// use signalbook::portfolio::CostModel;
///
/// let model = CostModel::new(10.0).unwrap();
/// // 10 bps on a full turnover = 0.1% of capital
/// assert!((model.cost(1.0) - 0.001).abs() < 1e-15);
/// assert_eq!(CostModel::zero().cost(1.0), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    /// Cost per unit of turnover, in basis points (1 bps = 0.01%)
    transaction_cost_bps: f64,
}

impl CostModel {
    /// A zero-cost model.
    pub fn zero() -> Self {
        Self {
            transaction_cost_bps: 0.0,
        }
    }

    /// Create a model charging `transaction_cost_bps` per unit of turnover.
    ///
    /// Negative or non-finite rates are rejected.
    pub fn new(transaction_cost_bps: f64) -> Result<Self, ConfigError> {
        if !transaction_cost_bps.is_finite() {
            return Err(ConfigError::NonFiniteCost(transaction_cost_bps));
        }
        if transaction_cost_bps < 0.0 {
            return Err(ConfigError::NegativeCost(transaction_cost_bps));
        }
        Ok(Self {
            transaction_cost_bps,
        })
    }

    #[inline]
    pub fn bps(&self) -> f64 {
        self.transaction_cost_bps
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.transaction_cost_bps == 0.0
    }

    /// Cost, as a fraction of capital, of trading `turnover` of the book.
    ///
    /// Always exactly `0.0` for a zero-cost model.
    pub fn cost(&self, turnover: f64) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        self.transaction_cost_bps / 10_000.0 * turnover
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::zero()
    }
}
