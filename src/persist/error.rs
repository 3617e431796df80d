//! Persistence error types.

use thiserror::Error;

/// Errors that can occur while persisting values
#[derive(Debug, Error)]
pub enum PersistError {
    /// Encoding a value to its stored form failed
    #[error("Encoding failed: {0}")]
    EncodeFailed(String),

    /// Decoding a stored value failed
    #[error("Decoding failed: {0}")]
    DecodeFailed(String),
}
