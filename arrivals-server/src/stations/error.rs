//! Station reference data error types.

use std::path::PathBuf;

/// Errors that can occur when reading the station dataset.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// The dataset file does not exist
    #[error("station data not found at {}", path.display())]
    Missing { path: PathBuf },

    /// The dataset exists but could not be read
    #[error("failed to read station data: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not a valid station list
    #[error("invalid station data: {0}")]
    Json(#[from] serde_json::Error),
}
