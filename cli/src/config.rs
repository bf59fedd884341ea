//! TOML configuration loading and validation.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use signalbook::BacktestConfig;
use signalbook::portfolio::sweep::grid;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backtest: BacktestConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub sweep: Option<SweepConfig>,
}

/// Input panel files.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub scores: PathBuf,
    pub returns: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: f64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_curve_file")]
    pub curve_file: String,
    #[serde(default = "default_events_file")]
    pub events_file: String,
}

fn default_periods_per_year() -> f64 {
    252.0
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./outputs")
}
fn default_curve_file() -> String {
    "equity_curve.json".into()
}
fn default_events_file() -> String {
    "events.jsonl".into()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            periods_per_year: default_periods_per_year(),
            output_dir: default_output_dir(),
            curve_file: default_curve_file(),
            events_file: default_events_file(),
        }
    }
}

/// Parameter lists expanded into a grid by `signalbook sweep`.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    pub top_k: Vec<usize>,
    pub rebalance_every: Vec<usize>,
    pub transaction_cost_bps: Vec<f64>,
}

impl Config {
    /// Load config from a TOML file. Relative paths resolve against the
    /// directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml(&contents, base)
    }

    /// Parse and validate a TOML document, resolving relative paths against `base`.
    pub fn from_toml(contents: &str, base: &Path) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.data.scores = resolve(base, &config.data.scores);
        config.data.returns = resolve(base, &config.data.returns);
        config.report.output_dir = resolve(base, &config.report.output_dir);
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        self.backtest.validate()?;
        let ppy = self.report.periods_per_year;
        if !ppy.is_finite() || ppy <= 0.0 {
            return Err(Error::Config(format!(
                "periods_per_year must be > 0, got {ppy}"
            )));
        }
        if self.report.curve_file.is_empty() || self.report.events_file.is_empty() {
            return Err(Error::Config("output file names must not be empty".into()));
        }
        if let Some(sweep) = &self.sweep {
            if sweep.top_k.is_empty()
                || sweep.rebalance_every.is_empty()
                || sweep.transaction_cost_bps.is_empty()
            {
                return Err(Error::Config("sweep lists must not be empty".into()));
            }
        }
        Ok(())
    }

    /// Full path of the equity curve output.
    pub fn curve_path(&self) -> PathBuf {
        self.report.output_dir.join(&self.report.curve_file)
    }

    /// Full path of the event log output.
    pub fn events_path(&self) -> PathBuf {
        self.report.output_dir.join(&self.report.events_file)
    }

    /// Configurations of the `[sweep]` grid, or `None` without a `[sweep]` section.
    pub fn sweep_grid(&self) -> Option<Vec<BacktestConfig>> {
        self.sweep
            .as_ref()
            .map(|s| grid(&s.top_k, &s.rebalance_every, &s.transaction_cost_bps))
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signalbook::ConfigError;

    fn example_toml() -> &'static str {
        r#"
[backtest]
top_k = 3
rebalance_every = 1
transaction_cost_bps = 10.0

[data]
scores = "data/scores.json"
returns = "/abs/returns.json"

[report]
periods_per_year = 12.0

[sweep]
top_k = [1, 3]
rebalance_every = [1, 2]
transaction_cost_bps = [0.0, 10.0, 25.0]
"#
    }

    #[test]
    fn parse_example_config() {
        let config = Config::from_toml(example_toml(), Path::new("/cfg")).unwrap();
        assert_eq!(config.backtest, BacktestConfig::new(3, 1, 10.0));
        assert_eq!(config.report.periods_per_year, 12.0);
        assert_eq!(config.data.scores, PathBuf::from("/cfg/data/scores.json"));
        assert_eq!(config.data.returns, PathBuf::from("/abs/returns.json"));
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let toml = r#"
[data]
scores = "s.json"
returns = "r.json"
"#;
        let config = Config::from_toml(toml, Path::new("")).unwrap();
        assert_eq!(config.backtest, BacktestConfig::default());
        assert_eq!(config.report.periods_per_year, 252.0);
        assert_eq!(
            config.curve_path(),
            PathBuf::from("./outputs/equity_curve.json")
        );
        assert_eq!(config.events_path(), PathBuf::from("./outputs/events.jsonl"));
        assert!(config.sweep_grid().is_none());
    }

    #[test]
    fn partial_backtest_section_keeps_defaults() {
        let toml = r#"
[backtest]
top_k = 10

[data]
scores = "s.json"
returns = "r.json"
"#;
        let config = Config::from_toml(toml, Path::new("")).unwrap();
        assert_eq!(config.backtest, BacktestConfig::new(10, 5, 0.0));
    }

    #[test]
    fn validate_catches_zero_top_k() {
        let toml = example_toml().replace("top_k = 3", "top_k = 0");
        let err = Config::from_toml(&toml, Path::new("")).unwrap_err();
        assert!(matches!(err, Error::Backtest(ConfigError::ZeroTopK)));
    }

    #[test]
    fn validate_catches_negative_cost() {
        let toml = example_toml().replace(
            "transaction_cost_bps = 10.0",
            "transaction_cost_bps = -1.0",
        );
        let err = Config::from_toml(&toml, Path::new("")).unwrap_err();
        assert!(matches!(err, Error::Backtest(ConfigError::NegativeCost(_))));
    }

    #[test]
    fn validate_catches_bad_periods() {
        let toml = example_toml().replace("periods_per_year = 12.0", "periods_per_year = 0.0");
        assert!(matches!(
            Config::from_toml(&toml, Path::new("")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn validate_catches_empty_sweep_list() {
        let toml = example_toml().replace("top_k = [1, 3]", "top_k = []");
        assert!(matches!(
            Config::from_toml(&toml, Path::new("")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn sweep_grid_expands_product() {
        let config = Config::from_toml(example_toml(), Path::new("")).unwrap();
        let grid = config.sweep_grid().unwrap();
        assert_eq!(grid.len(), 12);
        assert_eq!(grid[0], BacktestConfig::new(1, 1, 0.0));
        assert_eq!(grid[11], BacktestConfig::new(3, 2, 25.0));
    }

    #[test]
    fn missing_data_section_is_parse_error() {
        let err = Config::from_toml("[backtest]\ntop_k = 2\n", Path::new("")).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
