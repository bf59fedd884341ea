//! Top-K equal-weight backtest: score panel + return panel → equity curve.
//!
//! The run is a single left fold over the rebalance schedule. The only state
//! carried from one date to the next is the last portfolio that was actually
//! built; a date whose universe is too small is skipped and leaves that state
//! untouched, so the next turnover is measured against the portfolio from
//! before the gap.
//!
//! Each return cell at a rebalance date is taken to be the realized excess return
//! over the whole holding period until the next rebalance. No compounding happens
//! between rebalance dates.

use std::fmt;

use log::{debug, info};

use crate::error::ConfigError;
use crate::panel::Panel;
use crate::portfolio::{CostModel, Portfolio, Universe, turnover};
use crate::schedule::RebalanceSchedule;
use crate::series::{EQUITY_CURVE_NAME, EquityCurve, NET_RETURN_NAME, Series};
use crate::types::{Date, Symbol};

/// Parameters of a backtest run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BacktestConfig {
    /// Number of instruments held at each rebalance
    pub top_k: usize,
    /// Stride over positions of the common date list
    pub rebalance_every: usize,
    /// Cost per unit of turnover, in basis points
    pub transaction_cost_bps: f64,
}

impl BacktestConfig {
    pub fn new(top_k: usize, rebalance_every: usize, transaction_cost_bps: f64) -> Self {
        Self {
            top_k,
            rebalance_every,
            transaction_cost_bps,
        }
    }

    /// Check every parameter. Values are never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }
        if self.rebalance_every == 0 {
            return Err(ConfigError::ZeroRebalanceEvery);
        }
        CostModel::new(self.transaction_cost_bps).map(|_| ())
    }
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            rebalance_every: 5,
            transaction_cost_bps: 0.0,
        }
    }
}

/// Outcome of one successful rebalance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RebalanceEvent {
    pub date: Date,
    /// Fraction of the book traded, in [0, 1]
    pub turnover: f64,
    /// Transaction cost as a fraction of capital
    pub cost: f64,
    /// Equal-weight realized return of the selection
    pub gross_return: f64,
    /// `gross_return - cost`
    pub net_return: f64,
    /// Held symbols, best score first
    pub selected: Vec<Symbol>,
}

/// Turnover and cost summary of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostDiagnostics {
    pub num_events: usize,
    pub avg_turnover: f64,
    pub avg_cost: f64,
    pub total_cost: f64,
}

impl CostDiagnostics {
    /// Summarize `events`, `None` when there are none.
    pub fn from_events(events: &[RebalanceEvent]) -> Option<Self> {
        if events.is_empty() {
            return None;
        }
        let n = events.len() as f64;
        let total_turnover: f64 = events.iter().map(|e| e.turnover).sum();
        let total_cost: f64 = events.iter().map(|e| e.cost).sum();
        Some(Self {
            num_events: events.len(),
            avg_turnover: total_turnover / n,
            avg_cost: total_cost / n,
            total_cost,
        })
    }
}

impl fmt::Display for CostDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "avg turnover: {:.3}, avg cost per rebalance: {:.5}, total cost over period: {:.4}",
            self.avg_turnover, self.avg_cost, self.total_cost
        )
    }
}

/// Everything a run produces.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestRun {
    events: Vec<RebalanceEvent>,
    curve: EquityCurve,
    skipped: Vec<Date>,
}

impl BacktestRun {
    /// Events in chronological order.
    pub fn events(&self) -> &[RebalanceEvent] {
        &self.events
    }

    /// Cumulative growth, one point per event.
    pub fn curve(&self) -> &EquityCurve {
        &self.curve
    }

    pub fn into_curve(self) -> EquityCurve {
        self.curve
    }

    /// Scheduled dates that produced no portfolio.
    pub fn skipped(&self) -> &[Date] {
        &self.skipped
    }

    /// Net excess return per event.
    pub fn net_returns(&self) -> Series {
        Series::from_points(
            NET_RETURN_NAME,
            self.events.iter().map(|e| (e.date, e.net_return)).collect(),
        )
    }

    pub fn diagnostics(&self) -> Option<CostDiagnostics> {
        CostDiagnostics::from_events(&self.events)
    }
}

/// State threaded through the schedule.
#[derive(Default)]
struct FoldState {
    prev: Option<Portfolio>,
    events: Vec<RebalanceEvent>,
    skipped: Vec<Date>,
}

/// Per-run inputs shared by every step.
struct Rebalancer<'a> {
    scores: &'a Panel,
    returns: &'a Panel,
    top_k: usize,
    cost_model: CostModel,
}

impl Rebalancer<'_> {
    fn step(&self, mut state: FoldState, date: Date) -> FoldState {
        let universe = Universe::at(date, self.scores, self.returns);
        let Some(portfolio) = Portfolio::top_k(&universe, self.top_k) else {
            debug!(
                "skip {date}: {} comparable instruments, top_k = {}",
                universe.len(),
                self.top_k
            );
            state.skipped.push(date);
            return state;
        };

        let turnover = turnover(&portfolio, state.prev.as_ref());
        let cost = self.cost_model.cost(turnover);
        let gross_return = portfolio.gross_return(&universe);

        state.events.push(RebalanceEvent {
            date,
            turnover,
            cost,
            gross_return,
            net_return: gross_return - cost,
            selected: portfolio.selected().to_vec(),
        });
        state.prev = Some(portfolio);
        state
    }
}

/// Run the top-K backtest.
///
/// Fails only on an invalid `config`. Panels without common dates, and dates
/// without enough comparable instruments, yield fewer (possibly zero) events.
///
/// # Example
///
/// ```
/// use signalbook::{BacktestConfig, Date, Panel, Symbol, run_backtest};
///
/// let d1 = Date::from_ymd_opt(2020, 1, 31).unwrap();
/// let cols = vec![Symbol::new("A"), Symbol::new("B"), Symbol::new("C")];
/// let scores = Panel::new(cols.clone()).unwrap()
///     .with_row(d1, vec![Some(0.05), Some(0.03), Some(0.01)]).unwrap();
/// let returns = Panel::new(cols).unwrap()
///     .with_row(d1, vec![Some(0.02), Some(0.01), Some(-0.01)]).unwrap();
///
/// let run = run_backtest(&scores, &returns, &BacktestConfig::new(2, 1, 0.0)).unwrap();
/// assert_eq!(run.curve().name(), "equity_excess");
/// assert!((run.curve().get(d1).unwrap() - 1.015).abs() < 1e-12);
/// ```
pub fn run_backtest(
    scores: &Panel,
    returns: &Panel,
    config: &BacktestConfig,
) -> Result<BacktestRun, ConfigError> {
    config.validate()?;
    let cost_model = CostModel::new(config.transaction_cost_bps)?;

    let schedule = RebalanceSchedule::build(scores, returns, config.rebalance_every)?;
    debug!(
        "backtest: {} rebalance dates, top_k = {}, stride = {}, cost = {} bps",
        schedule.len(),
        config.top_k,
        config.rebalance_every,
        cost_model.bps()
    );

    let rebalancer = Rebalancer {
        scores,
        returns,
        top_k: config.top_k,
        cost_model,
    };
    let FoldState {
        mut events,
        skipped,
        ..
    } = schedule
        .iter()
        .fold(FoldState::default(), |state, date| rebalancer.step(state, date));

    // Schedule order is already chronological.
    if !events.is_sorted_by_key(|e| e.date) {
        events.sort_by_key(|e| e.date);
    }

    let net: Vec<(Date, f64)> = events.iter().map(|e| (e.date, e.net_return)).collect();
    let curve = Series::compound(EQUITY_CURVE_NAME, &net);

    let run = BacktestRun {
        events,
        curve,
        skipped,
    };

    if !cost_model.is_zero() {
        if let Some(diag) = run.diagnostics() {
            info!("[cost] {diag}");
        }
    }
    debug!(
        "backtest done: {} events, {} skipped",
        run.events.len(),
        run.skipped.len()
    );

    Ok(run)
}

/// Run the backtest and keep only the equity curve.
pub fn equity_curve(
    scores: &Panel,
    returns: &Panel,
    config: &BacktestConfig,
) -> Result<EquityCurve, ConfigError> {
    run_backtest(scores, returns, config).map(BacktestRun::into_curve)
}
