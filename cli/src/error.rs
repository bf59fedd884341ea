//! Error types for the command-line runner.

use std::path::PathBuf;

use signalbook::ConfigError;

/// All errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid backtest parameters: {0}")]
    Backtest(#[from] ConfigError),

    #[error("failed to load panel {path}: {source}")]
    PanelRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this error: 2 for invalid parameters, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Backtest(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
