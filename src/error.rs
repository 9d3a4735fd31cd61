/*
 * Error Module
 *
 * The simulation core is total and never fails; errors only arise while
 * loading and validating configuration.
 */

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0} must be greater than zero (got {1})")]
    NonPositive(&'static str, f32),
    #[error("{0} must not be negative (got {1})")]
    Negative(&'static str, f32),
    #[error("flock.boid_count must be at least 1")]
    EmptyFlock,
    #[error("steering.max_neighbors must be at least 1")]
    ZeroNeighbors,
}
