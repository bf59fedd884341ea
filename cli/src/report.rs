//! Plain-text rendering of command results.

use std::fmt;

use crate::commands::{Evaluation, RunReport, SweepRow};

/// Metrics block, cost line and output locations of a `run`.
impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        writeln!(
            f,
            "top_k = {}, rebalance_every = {}, transaction_cost_bps = {}",
            c.top_k, c.rebalance_every, c.transaction_cost_bps
        )?;
        match &self.metrics {
            Some(m) => write!(f, "{m}")?,
            None => writeln!(
                f,
                "No rebalance events ({} scheduled dates skipped)",
                self.run.skipped().len()
            )?,
        }
        if let Some(diag) = self.run.diagnostics() {
            writeln!(f, "[cost] {diag}")?;
        }
        if let Some(files) = &self.written {
            writeln!(f, "Equity curve: {}", files.curve.display())?;
            writeln!(f, "Events:       {}", files.events.display())?;
        }
        Ok(())
    }
}

/// Regression and information-coefficient summary of an `evaluate`.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prediction Quality ({} pairs)", self.num_pairs)?;
        writeln!(f, "  MSE:             {:>10.6}", self.regression.mse)?;
        writeln!(f, "  MAE:             {:>10.6}", self.regression.mae)?;
        writeln!(f, "  R2:              {:>10.4}", self.regression.r2)?;
        writeln!(f, "  IC (Pearson):    {:>10.4}", self.ic.pearson)?;
        writeln!(f, "  IC (Spearman):   {:>10.4}", self.ic.spearman)?;
        match self.mean_rank_ic {
            Some(ic) => writeln!(
                f,
                "  Mean rank IC:    {ic:>10.4} over {} dates",
                self.rank_ic_dates
            ),
            None => writeln!(f, "  Mean rank IC:           n/a"),
        }
    }
}

/// One fixed-width line: parameters, then total return, Sharpe and turnover.
impl fmt::Display for SweepRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.config;
        write!(
            f,
            "{:>6} {:>6} {:>8.2} ",
            c.top_k, c.rebalance_every, c.transaction_cost_bps
        )?;
        match &self.outcome {
            Ok(Some(m)) => write!(
                f,
                "{:>9.2}% {:>8.2} {:>10.3}",
                m.total_return * 100.0,
                m.sharpe,
                m.avg_turnover
            ),
            Ok(None) => write!(f, "no events"),
            Err(e) => write!(f, "invalid: {e}"),
        }
    }
}

/// Header plus one [`SweepRow`] line per configuration, in grid order.
pub struct SweepTable<'a>(pub &'a [SweepRow]);

impl fmt::Display for SweepTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6} {:>6} {:>8} {:>10} {:>8} {:>10}",
            "top_k", "stride", "bps", "total_ret", "sharpe", "turnover"
        )?;
        for row in self.0 {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
