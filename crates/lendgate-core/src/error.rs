//! Error types for the LENDGATE system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LendgateError {
    /// Malformed CIDR input — rejected at write time, never stored.
    #[error("Invalid CIDR block '{block}': {reason}")]
    InvalidBlock { block: String, reason: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type LendgateResult<T> = Result<T, LendgateError>;
