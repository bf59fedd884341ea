//! Panel loading for the configured data files.

use std::path::Path;

use log::info;
use signalbook::{Panel, persistence};

use crate::config::Config;
use crate::error::{Error, Result};

/// Load one JSON panel, attaching the path to any failure.
pub fn load_panel(path: &Path) -> Result<Panel> {
    let panel = persistence::load_panel(path).map_err(|e| Error::PanelRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(
        "loaded {}: {} dates x {} symbols",
        path.display(),
        panel.len(),
        panel.symbols().len()
    );
    Ok(panel)
}

/// Load the `(scores, returns)` panels named in `config`.
pub fn load_panels(config: &Config) -> Result<(Panel, Panel)> {
    let scores = load_panel(&config.data.scores)?;
    let returns = load_panel(&config.data.returns)?;
    Ok((scores, returns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = load_panel(Path::new("/nonexistent/scores.json")).unwrap_err();
        assert!(matches!(err, Error::PanelRead { .. }));
        assert!(err.to_string().contains("/nonexistent/scores.json"));
    }

    #[test]
    fn loads_valid_panel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(
            &path,
            r#"{"symbols": ["A", "B"], "rows": {"2020-01-31": [0.1, null]}}"#,
        )
        .unwrap();
        let panel = load_panel(&path).unwrap();
        assert_eq!(panel.len(), 1);
        assert_eq!(panel.symbols().len(), 2);
    }
}
