//! The `run`, `evaluate` and `sweep` flows.
//!
//! Each flow loads the configured panels, does its work, and hands back a plain
//! value for [`crate::report`] to render. Nothing here writes to stdout.

use std::path::PathBuf;

use log::info;
use signalbook::portfolio::sweep::sweep as run_sweep;
use signalbook::stats::{
    InformationCoefficient, RegressionReport, information_coefficient, panel_pairs,
    rank_ic_series, regression_report,
};
use signalbook::{BacktestConfig, BacktestRun, ConfigError, Metrics, persistence, run_backtest};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::loader;

/// Options for [`run`].
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Write the curve and event log into the output directory
    pub write: bool,
}

/// Output files of a `run` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenFiles {
    pub curve: PathBuf,
    pub events: PathBuf,
}

/// Result of `signalbook run`.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub config: BacktestConfig,
    pub run: BacktestRun,
    /// `None` when the run produced no events
    pub metrics: Option<Metrics>,
    pub written: Option<WrittenFiles>,
}

/// Run the configured backtest and optionally persist its outputs.
pub fn run(config: &Config, opts: &RunOptions) -> Result<RunReport> {
    let (scores, returns) = loader::load_panels(config)?;
    let run = run_backtest(&scores, &returns, &config.backtest)?;
    info!(
        "backtest finished: {} events, {} skipped dates",
        run.events().len(),
        run.skipped().len()
    );
    let metrics = Metrics::from_run(&run, config.report.periods_per_year);

    let written = if opts.write {
        std::fs::create_dir_all(&config.report.output_dir)?;
        let files = WrittenFiles {
            curve: config.curve_path(),
            events: config.events_path(),
        };
        persistence::save_series(run.curve(), &files.curve)?;
        persistence::save_events(run.events(), &files.events)?;
        info!(
            "wrote {} and {}",
            files.curve.display(),
            files.events.display()
        );
        Some(files)
    } else {
        None
    };

    Ok(RunReport {
        config: config.backtest.clone(),
        run,
        metrics,
        written,
    })
}

/// Result of `signalbook evaluate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Number of (date, symbol) cells valid in both panels
    pub num_pairs: usize,
    pub regression: RegressionReport,
    pub ic: InformationCoefficient,
    /// Mean of the per-date rank IC, `None` if no date qualified
    pub mean_rank_ic: Option<f64>,
    pub rank_ic_dates: usize,
}

/// Score the prediction panel against the realized panel.
pub fn evaluate(config: &Config) -> Result<Evaluation> {
    let (scores, returns) = loader::load_panels(config)?;
    let (y_true, y_pred) = panel_pairs(&scores, &returns);
    let rank_ic = rank_ic_series(&scores, &returns);

    Ok(Evaluation {
        num_pairs: y_true.len(),
        regression: regression_report(&y_true, &y_pred),
        ic: information_coefficient(&y_true, &y_pred),
        mean_rank_ic: rank_ic.mean(),
        rank_ic_dates: rank_ic.len(),
    })
}

/// One configuration of a sweep and what it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub config: BacktestConfig,
    pub outcome: std::result::Result<Option<Metrics>, ConfigError>,
}

/// Run every configuration of the `[sweep]` grid.
pub fn sweep(config: &Config) -> Result<Vec<SweepRow>> {
    let grid = config
        .sweep_grid()
        .ok_or_else(|| Error::Config("no [sweep] section in config".into()))?;
    let (scores, returns) = loader::load_panels(config)?;
    info!("sweeping {} configurations", grid.len());

    let periods = config.report.periods_per_year;
    let rows = run_sweep(&scores, &returns, &grid)
        .into_iter()
        .zip(grid)
        .map(|(result, config)| SweepRow {
            config,
            outcome: result.map(|run| Metrics::from_run(&run, periods)),
        })
        .collect();
    Ok(rows)
}
