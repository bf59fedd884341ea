//! Performance summary of a backtest run.

use crate::backtest::BacktestRun;

/// Summary statistics of a run's net excess returns.
///
/// Returns are per rebalance event, so `periods_per_year` is the number of
/// rebalances per year (e.g. 252 / 5 for a weekly stride over daily data, 12 for
/// a monthly schedule).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Final growth factor minus one (e.g. 0.15 = 15%)
    pub total_return: f64,
    /// Compound annual growth rate
    pub cagr: f64,
    /// Annualized sample standard deviation of net returns
    pub volatility: f64,
    /// Annualized mean / std of net returns (returns are already excess)
    pub sharpe: f64,
    /// Largest peak-to-trough decline of the curve, as a positive fraction
    pub max_drawdown: f64,
    /// Share of events with a positive net return
    pub hit_rate: f64,
    pub avg_turnover: f64,
    pub total_cost: f64,
    pub num_events: usize,
    pub num_skipped: usize,
}

impl Metrics {
    /// Compute metrics for `run`. `None` if the run produced no events.
    pub fn from_run(run: &BacktestRun, periods_per_year: f64) -> Option<Self> {
        let diag = run.diagnostics()?;
        let net: Vec<f64> = run.events().iter().map(|e| e.net_return).collect();
        let n = net.len();

        let growth = run.curve().last().map_or(1.0, |(_, v)| v);
        let total_return = growth - 1.0;

        let years = n as f64 / periods_per_year;
        let cagr = if growth <= 0.0 {
            -1.0
        } else if years > 0.0 {
            growth.powf(1.0 / years) - 1.0
        } else {
            0.0
        };

        let mean = net.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            (net.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        let volatility = std * periods_per_year.sqrt();
        let sharpe = if std > 0.0 {
            mean / std * periods_per_year.sqrt()
        } else {
            0.0
        };

        let hit_rate = net.iter().filter(|&&r| r > 0.0).count() as f64 / n as f64;

        Some(Self {
            total_return,
            cagr,
            volatility,
            sharpe,
            max_drawdown: max_drawdown(run.curve().values()),
            hit_rate,
            avg_turnover: diag.avg_turnover,
            total_cost: diag.total_cost,
            num_events: n,
            num_skipped: run.skipped().len(),
        })
    }
}

/// Peak-to-trough decline of a growth curve that starts at 1.0.
fn max_drawdown(curve: impl Iterator<Item = f64>) -> f64 {
    let mut peak = 1.0_f64;
    let mut worst = 0.0_f64;
    for value in curve {
        peak = peak.max(value);
        worst = worst.max((peak - value) / peak);
    }
    worst
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Backtest Metrics")?;
        writeln!(f, "  Total return:    {:>8.2}%", self.total_return * 100.0)?;
        writeln!(f, "  CAGR:            {:>8.2}%", self.cagr * 100.0)?;
        writeln!(f, "  Volatility:      {:>8.2}%", self.volatility * 100.0)?;
        writeln!(f, "  Sharpe:          {:>8.2}", self.sharpe)?;
        writeln!(f, "  Max drawdown:    {:>8.2}%", self.max_drawdown * 100.0)?;
        writeln!(f, "  Hit rate:        {:>8.2}%", self.hit_rate * 100.0)?;
        writeln!(f, "  Avg turnover:    {:>8.3}", self.avg_turnover)?;
        writeln!(f, "  Total cost:      {:>8.4}", self.total_cost)?;
        writeln!(
            f,
            "  Events/Skipped:  {}/{}",
            self.num_events, self.num_skipped
        )
    }
}
