//! Authentication and enforcement configuration.

use lendgate_core::models::decision::MatchStrategy;

use crate::cookie::SameSite;

/// What to do when a session's issuance source address no longer
/// matches the current request's address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressPolicy {
    /// Refuse validation and force re-authentication.
    #[default]
    Strict,
    /// Log the mismatch and allow.
    Lenient,
}

/// Configuration for the session manager and decision engine.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session token lifetime in seconds (default: 86_400 = 24 hours).
    pub session_lifetime_secs: u64,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// SameSite attribute emitted on the session cookie.
    pub same_site: SameSite,
    /// Source-address re-check policy applied on every validation.
    pub address_policy: AddressPolicy,
    /// Allowlist enforcement. Turning this off is an emergency bypass;
    /// it is never the default and every bypassed login is logged.
    pub enforcement_enabled: bool,
    /// Tie-break strategy among overlapping allowlist blocks.
    pub match_strategy: MatchStrategy,
    /// Optional pepper prepended to passwords before Argon2id
    /// verification.
    pub pepper: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_lifetime_secs: 86_400,
            cookie_name: "lendgate_session".into(),
            same_site: SameSite::Lax,
            address_policy: AddressPolicy::Strict,
            enforcement_enabled: true,
            match_strategy: MatchStrategy::OrderBased,
            pepper: None,
        }
    }
}

impl AuthConfig {
    /// Build from `LENDGATE_*` environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let session_lifetime_secs = std::env::var("LENDGATE_SESSION_LIFETIME_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.session_lifetime_secs);

        let address_policy = match std::env::var("LENDGATE_ADDRESS_POLICY").as_deref() {
            Ok("lenient") => AddressPolicy::Lenient,
            _ => AddressPolicy::Strict,
        };

        let enforcement_enabled = match std::env::var("LENDGATE_ENFORCEMENT").as_deref() {
            Ok("off") => false,
            _ => true,
        };

        let match_strategy = match std::env::var("LENDGATE_MATCH_STRATEGY").as_deref() {
            Ok("most-specific-first") => MatchStrategy::MostSpecificFirst,
            _ => MatchStrategy::OrderBased,
        };

        Self {
            session_lifetime_secs,
            address_policy,
            enforcement_enabled,
            match_strategy,
            pepper: std::env::var("LENDGATE_PEPPER").ok(),
            ..defaults
        }
    }
}
