//! Authentication error types.
//!
//! Credential failures and allowlist denials carry their specific
//! reason for server-side audit logging, but the conversion into
//! [`LendgateError`] collapses all of them to one uniform denial — a
//! caller at the HTTP boundary must not be able to tell "bad password"
//! apart from "address not allowed".

use lendgate_core::error::LendgateError;
use lendgate_core::models::decision::DenyReason;
use thiserror::Error;

/// The single denial message exposed outward for every refused
/// authentication or validation.
pub const UNIFORM_DENIAL: &str = "authentication failed";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is inactive")]
    AccountInactive,

    #[error("account is locked")]
    AccountLocked,

    #[error("access denied: {}", .0.as_str())]
    AccessDenied(DenyReason),

    #[error("session source address mismatch")]
    AddressMismatch,

    #[error("session has expired")]
    SessionExpired,

    #[error("invalid session token")]
    SessionInvalid,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for LendgateError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::AccountInactive
            | AuthError::AccountLocked
            | AuthError::AccessDenied(_)
            | AuthError::AddressMismatch
            | AuthError::SessionExpired
            | AuthError::SessionInvalid => LendgateError::AuthenticationFailed {
                reason: UNIFORM_DENIAL.into(),
            },
            AuthError::Crypto(msg) => LendgateError::Crypto(msg),
        }
    }
}
