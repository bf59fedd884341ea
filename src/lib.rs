//! # signalbook
//!
//! A deterministic backtesting engine for evaluating the economic value of a
//! predictive signal.
//!
//! Given a panel of predicted scores and a panel of realized excess returns, it
//! simulates a periodically rebalanced, equal-weight, top-K long portfolio and
//! returns its cumulative growth curve net of transaction costs.
//!
//! ## Features
//!
//! - **Typed panels**: date × symbol tables with explicit missing cells
//! - **Position-stride schedule**: rebalance every N common dates, not N calendar days
//! - **Top-K equal weighting**: stable ranking, ties resolved by column order
//! - **Turnover-proportional costs**: `bps / 10_000 × turnover`, exact zero-cost path
//! - **Skip-and-retain**: dates with too few instruments leave the carried book untouched
//! - **Reporting**: regression errors, information coefficients, performance metrics
//!
//! ## Quick Start
//!
//! ```
//! use signalbook::{BacktestConfig, Date, Panel, Symbol, run_backtest};
//!
//! let d1 = Date::from_ymd_opt(2020, 1, 31).unwrap();
//! let d2 = Date::from_ymd_opt(2020, 2, 29).unwrap();
//! let cols = vec![Symbol::new("A"), Symbol::new("B"), Symbol::new("C")];
//!
//! let scores = Panel::new(cols.clone()).unwrap()
//!     .with_row(d1, vec![Some(0.05), Some(0.03), Some(0.01)]).unwrap()
//!     .with_row(d2, vec![Some(0.00), Some(0.06), Some(0.05)]).unwrap();
//! let returns = Panel::new(cols).unwrap()
//!     .with_row(d1, vec![Some(0.02), Some(0.01), Some(-0.01)]).unwrap()
//!     .with_row(d2, vec![Some(0.01), Some(0.03), Some(0.02)]).unwrap();
//!
//! let config = BacktestConfig { top_k: 2, rebalance_every: 1, transaction_cost_bps: 10.0 };
//! let run = run_backtest(&scores, &returns, &config).unwrap();
//!
//! // Day 1 holds {A, B}; day 2 rotates A out for C: half the book trades.
//! assert_eq!(run.events()[1].turnover, 0.5);
//! let growth = run.curve().last().unwrap().1;
//! assert!((growth - 1.015 * (1.0 + 0.025 - 0.0005)).abs() < 1e-12);
//! ```
//!
//! ## Missing Data
//!
//! Absent, NaN or infinite cells are dropped per panel before the two panels are
//! intersected. If fewer than `top_k` instruments survive on a rebalance date the
//! date is skipped:
//!
//! ```
//! use signalbook::{BacktestConfig, Date, Panel, Symbol, run_backtest};
//!
//! let d1 = Date::from_ymd_opt(2020, 1, 1).unwrap();
//! let cols = vec![Symbol::new("A"), Symbol::new("B")];
//! let scores = Panel::new(cols.clone()).unwrap()
//!     .with_row(d1, vec![Some(1.0), None]).unwrap();
//! let returns = Panel::new(cols).unwrap()
//!     .with_row(d1, vec![Some(0.01), Some(0.02)]).unwrap();
//!
//! let run = run_backtest(&scores, &returns, &BacktestConfig::new(2, 1, 0.0)).unwrap();
//! assert!(run.events().is_empty());
//! assert_eq!(run.skipped(), &[d1]);
//! assert_eq!(run.curve().name(), "equity_excess");
//! ```

pub mod backtest;
mod error;
pub mod panel;
#[cfg(feature = "persistence")]
pub mod persistence;
pub mod portfolio;
pub mod schedule;
pub mod series;
pub mod stats;
mod types;

// Re-export public API
pub use backtest::{
    BacktestConfig, BacktestRun, CostDiagnostics, RebalanceEvent, equity_curve, run_backtest,
};
pub use error::{ConfigError, PanelError};
pub use panel::{Panel, ReturnPanel, ScorePanel};
pub use portfolio::{CostModel, Metrics, Portfolio};
pub use schedule::RebalanceSchedule;
pub use series::{EQUITY_CURVE_NAME, EquityCurve, NET_RETURN_NAME, Series};
pub use types::{Date, SYMBOL_CAPACITY, Symbol};
