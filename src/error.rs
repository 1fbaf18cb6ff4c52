use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaddySenseError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A geocoding or forecast call failed; the message names the
    /// service and the underlying cause.
    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    /// Every geocoding strategy came back empty for this location text.
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    // The next two carry user-facing status-line text as-is.
    #[error("{0}")]
    InvalidData(String),

    #[error("{0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, PaddySenseError>;
