//! Parallel parameter sweep over backtest configurations.
//!
//! Runs are independent of each other, so a grid of configurations fans out
//! across threads. Each individual run still walks its schedule sequentially.

use crate::backtest::{BacktestConfig, BacktestRun, run_backtest};
use crate::error::ConfigError;
use crate::panel::Panel;

/// Run every configuration in `configs` in parallel, results in input order.
///
/// An invalid configuration yields an `Err` in its slot without affecting the
/// others.
///
/// # Example
///
/// ```ignore
/// use signalbook::portfolio::sweep::{grid, sweep};
///
/// let configs = grid(&[3, 5, 10], &[1, 5], &[0.0, 10.0]);
/// let runs = sweep(&scores, &returns, &configs);
/// ```
pub fn sweep(
    scores: &Panel,
    returns: &Panel,
    configs: &[BacktestConfig],
) -> Vec<Result<BacktestRun, ConfigError>> {
    use rayon::prelude::*;

    configs
        .par_iter()
        .map(|config| run_backtest(scores, returns, config))
        .collect()
}

/// Cartesian product of parameter lists: `top_k` outermost, cost innermost.
pub fn grid(top_ks: &[usize], strides: &[usize], costs_bps: &[f64]) -> Vec<BacktestConfig> {
    let mut configs = Vec::with_capacity(top_ks.len() * strides.len() * costs_bps.len());
    for &top_k in top_ks {
        for &stride in strides {
            for &bps in costs_bps {
                configs.push(BacktestConfig::new(top_k, stride, bps));
            }
        }
    }
    configs
}
