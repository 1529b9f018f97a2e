//! LENDGATE Auth — credential verification, per-user allowlist access
//! decisions, and session issuance/validation/revocation.

pub mod admin;
pub mod config;
pub mod cookie;
pub mod decision;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use admin::AllowlistAdmin;
pub use config::{AddressPolicy, AuthConfig};
pub use cookie::{SameSite, SessionCookie};
pub use decision::AccessEngine;
pub use error::AuthError;
pub use service::{AuthenticateInput, SessionArtifact, SessionService};
