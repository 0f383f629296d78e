use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: missing column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}: bad value '{value}' at row {row}, column '{column}'")]
    Parse {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Unknown champion: {0}")]
    UnknownChampion(String),

    #[error("No release metadata for champion: {0}")]
    MissingRelease(String),

    #[error("Patch {patch} not found in {table}")]
    MissingPatch { patch: String, table: String },

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(f64),

    #[error("Invalid lifespan for {champion}: {lifespan}")]
    InvalidLifespan { champion: String, lifespan: f64 },

    #[error("Unknown KPI '{0}' (expected Presence, Win Rate or Ban Rate)")]
    UnknownKpi(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}
