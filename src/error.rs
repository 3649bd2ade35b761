use thiserror::Error;

/// Faults raised by a persistence backend.
///
/// These never leave a [`CollectionStore`](crate::CollectionStore); the store
/// logs them and degrades to its documented default.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted value could not be encoded or decoded
    #[error("Corrupt stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other backend-specific failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Failures talking to the remote recipe API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failed to send the request or read the body
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),
}

/// Errors surfaced by construction paths and the command line.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Invalid input provided by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
