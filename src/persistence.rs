//! File-based persistence: JSON panels, JSON Lines event logs, JSON series.
//!
//! Event logs hold one JSON object per line (`.jsonl`), which keeps them
//! streamable and easy to diff between runs.
//!
//! # Usage
//!
//! ```ignore
//! use signalbook::persistence;
//! use std::path::Path;
//!
//! let scores = persistence::load_panel(Path::new("scores.json"))?;
//! let returns = persistence::load_panel(Path::new("returns.json"))?;
//! let run = signalbook::run_backtest(&scores, &returns, &Default::default())?;
//! persistence::save_events(run.events(), Path::new("events.jsonl"))?;
//! persistence::save_series(run.curve(), Path::new("equity_curve.json"))?;
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::backtest::RebalanceEvent;
use crate::panel::Panel;
use crate::series::Series;

fn invalid_data(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e.to_string())
}

/// Load a panel from a JSON document:
/// `{"symbols": ["A", "B"], "rows": {"2020-01-31": [0.1, null]}}`.
///
/// Ragged rows and duplicate symbols are reported as `InvalidData`.
pub fn load_panel(path: &Path) -> io::Result<Panel> {
    let reader = io::BufReader::new(std::fs::File::open(path)?);
    serde_json::from_reader(reader).map_err(invalid_data)
}

/// Save a panel in the format read by [`load_panel`]. Absent cells become `null`.
pub fn save_panel(panel: &Panel, path: &Path) -> io::Result<()> {
    let mut writer = io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, panel).map_err(io::Error::other)?;
    writer.flush()
}

/// Save events in JSON Lines format, one event per line.
pub fn save_events(events: &[RebalanceEvent], path: &Path) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);

    for event in events {
        let json = serde_json::to_string(event).map_err(io::Error::other)?;
        writeln!(writer, "{json}")?;
    }

    writer.flush()
}

/// Load events from a JSON Lines file. Empty lines are skipped.
pub fn load_events(path: &Path) -> io::Result<Vec<RebalanceEvent>> {
    let reader = io::BufReader::new(std::fs::File::open(path)?);
    let mut events = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event = serde_json::from_str(line)
            .map_err(|e| invalid_data(format!("line {}: {e}", line_num + 1)))?;
        events.push(event);
    }

    Ok(events)
}

/// Save a series as `{"name": ..., "points": [["2020-01-31", 1.01], ...]}`.
pub fn save_series(series: &Series, path: &Path) -> io::Result<()> {
    let mut writer = io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, series).map_err(io::Error::other)?;
    writer.flush()
}

/// Load a series written by [`save_series`].
pub fn load_series(path: &Path) -> io::Result<Series> {
    let reader = io::BufReader::new(std::fs::File::open(path)?);
    serde_json::from_reader(reader).map_err(invalid_data)
}
