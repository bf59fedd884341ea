//! Error types for configuration and panel construction.

use thiserror::Error;

use crate::types::{Date, Symbol};

/// Invalid backtest configuration. Raised before any simulation work begins.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// `top_k` must select at least one instrument.
    #[error("top_k must be >= 1")]
    ZeroTopK,
    /// The rebalance stride must advance at least one schedule position.
    #[error("rebalance_every must be >= 1")]
    ZeroRebalanceEvery,
    /// Transaction cost is negative.
    #[error("transaction_cost_bps must be >= 0, got {0}")]
    NegativeCost(f64),
    /// Transaction cost is NaN or infinite.
    #[error("transaction_cost_bps must be finite, got {0}")]
    NonFiniteCost(f64),
}

/// Malformed panel input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PanelError {
    /// A symbol appears more than once in the panel columns.
    #[error("duplicate symbol in panel columns: {0}")]
    DuplicateSymbol(Symbol),
    /// A row does not carry one value per column.
    #[error("row {date} has {actual} values, expected {expected}")]
    RowWidth {
        date: Date,
        expected: usize,
        actual: usize,
    },
    /// A date was inserted twice.
    #[error("duplicate row for {0}")]
    DuplicateDate(Date),
}
