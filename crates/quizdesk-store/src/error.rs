//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file exists but does not contain a valid store.
    #[error("store file is corrupt: {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// An entity with this identifier already exists.
    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },

    /// The store file could not be written.
    #[error("failed to write store file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
