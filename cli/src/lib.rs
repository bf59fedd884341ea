//! signalbook-cli: command-line runner for signalbook backtests.
//!
//! Reads a TOML config naming a score panel and a return panel, runs the top-K
//! backtest, a prediction-quality evaluation, or a parameter sweep, and renders
//! the results as text. Backtest outputs are written as JSON into the configured
//! output directory.

pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;
