use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors returned by review stores and the batch driver.
pub enum StoreError {
    /// IO error on the store file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file is not a JSON array of reviews.
    #[error("malformed review store {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the reviews back failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No review with this id exists in the store.
    #[error("review not found: id={id}")]
    NotFound { id: u64 },

    /// Writing progress output failed.
    #[error("failed to write batch output: {0}")]
    Output(#[from] std::io::Error),
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
