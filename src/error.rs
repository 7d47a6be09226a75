use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Cannot read configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error while writing results: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to summarise results: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
