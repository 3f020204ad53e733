//! Error type for generator startup/configuration failures.

use thiserror::Error;

/// Failures that abort the generator before or during a run.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("mix weights must sum to 100, got {0}")]
    InvalidMix(u32),

    #[error("http client build failed: {0}")]
    Client(#[from] reqwest::Error),
}
