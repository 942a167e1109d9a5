use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ArchivumError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid archive record: {0}")]
    Validation(#[from] ValidationError),

    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    #[error("Failed to parse JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },
}

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Directory scan failed for '{path}': {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Worker channel closed unexpectedly")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, ArchivumError>;
