//! CLI entry point for signalbook.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use signalbook_cli::commands::{self, RunOptions};
use signalbook_cli::config::Config;
use signalbook_cli::report::SweepTable;

#[derive(Parser)]
#[command(name = "signalbook")]
#[command(about = "Top-K signal backtester: score panel + return panel -> equity curve")]
#[command(version)]
struct Cli {
    /// Path to config.toml
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the configured backtest and write the equity curve and event log
    Run {
        /// Print results without writing output files
        #[arg(long)]
        no_write: bool,
    },

    /// Score predictions against realized returns (MSE, MAE, R2, IC)
    Evaluate,

    /// Run every configuration of the [sweep] grid in parallel
    Sweep,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(e.exit_code());
        }
    };

    let result = match cli.command {
        Command::Run { no_write } => {
            commands::run(&config, &RunOptions { write: !no_write }).map(|r| r.to_string())
        }
        Command::Evaluate => commands::evaluate(&config).map(|e| e.to_string()),
        Command::Sweep => commands::sweep(&config).map(|rows| SweepTable(&rows).to_string()),
    };

    match result {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    }
}
