use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Could not read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Usage: {0}")]
    Usage(String),
    #[error("Signal plan needs {expected} green times, got {got}")]
    PlanShape { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
