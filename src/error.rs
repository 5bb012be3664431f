//! Error types for configuration and the `/ask` adapter.

use thiserror::Error;

/// Failure talking to the answer service.
#[derive(Error, Debug)]
pub enum AskError {
    /// Connection, request or body read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The background request worker is gone.
    #[error("request worker stopped")]
    WorkerStopped,
}

/// Invalid value in the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a whole number of milliseconds, got {value:?}")]
    InvalidDelay { name: &'static str, value: String },
}
