use crate::config::ConfigError;
use crate::events::error::EventError;
use crate::observations::error::ObservationError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrostError {
    #[error(transparent)]
    Observations(#[from] ObservationError),

    #[error(transparent)]
    Events(#[from] EventError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),
}
