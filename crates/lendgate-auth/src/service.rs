//! Session manager — login, validation, and revocation orchestration.
//!
//! State machine per session: Unauthenticated → (credentials + allow
//! decision) → Active → Expired/Revoked. All session state lives in
//! the durable store; parallel stateless handlers observe the same
//! Active/Expired view. Expiry is enforced on every [`validate`] call,
//! never by a background sweep.
//!
//! [`validate`]: SessionService::validate

use std::net::IpAddr;

use chrono::{DateTime, Duration, Utc};
use lendgate_core::error::{LendgateError, LendgateResult};
use lendgate_core::models::decision::AccessDecision;
use lendgate_core::models::session::{CreateSession, Session};
use lendgate_core::models::user::UserStatus;
use lendgate_core::repository::{AllowlistRepository, SessionRepository, UserRepository};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{AddressPolicy, AuthConfig};
use crate::cookie::SessionCookie;
use crate::decision::AccessEngine;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the login flow.
#[derive(Debug)]
pub struct AuthenticateInput {
    /// Username or email, accepted interchangeably.
    pub identifier: String,
    pub secret: String,
    /// Source address of the inbound request.
    pub source_addr: IpAddr,
}

/// Successful login result.
#[derive(Debug)]
pub struct SessionArtifact {
    /// Raw opaque session token (return to client, not stored).
    pub token: String,
    /// Session ID (can be used for logout).
    pub session_id: Uuid,
    pub expires_at: DateTime<Utc>,
    /// Ready-to-emit cookie, always Secure and HttpOnly.
    pub cookie: SessionCookie,
}

/// Session manager.
///
/// Generic over repository implementations so that the auth layer
/// has no dependency on the database crate.
pub struct SessionService<U, A, S>
where
    U: UserRepository + Clone,
    A: AllowlistRepository,
    S: SessionRepository,
{
    user_repo: U,
    session_repo: S,
    engine: AccessEngine<U, A>,
    config: AuthConfig,
}

impl<U, A, S> SessionService<U, A, S>
where
    U: UserRepository + Clone,
    A: AllowlistRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: U, allowlist_repo: A, session_repo: S, config: AuthConfig) -> Self {
        let engine = AccessEngine::new(user_repo.clone(), allowlist_repo, config.match_strategy);
        Self {
            user_repo,
            session_repo,
            engine,
            config,
        }
    }

    /// Authenticate with identifier + secret from `source_addr` and
    /// issue a session.
    ///
    /// Every refusal path returns before any token is generated or any
    /// row is written, so a denied caller receives no artifact of any
    /// kind. The specific refusal reason goes to the audit log only.
    pub async fn authenticate(&self, input: AuthenticateInput) -> LendgateResult<SessionArtifact> {
        // 1. Resolve the account. Unknown identifiers collapse to the
        //    same denial as a wrong password.
        let user = match self.user_repo.get_by_identifier(&input.identifier).await {
            Ok(u) => u,
            Err(LendgateError::NotFound { .. }) => {
                warn!(identifier = %input.identifier, source = %input.source_addr,
                      "login refused: unknown identifier");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        // 2. Verify the password.
        let valid = password::verify_password(
            &input.secret,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            warn!(user_id = %user.id, source = %input.source_addr,
                  "login refused: invalid credentials");
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Check account status.
        match user.status {
            UserStatus::Active => {}
            UserStatus::Locked => {
                warn!(user_id = %user.id, "login refused: account locked");
                return Err(AuthError::AccountLocked.into());
            }
            UserStatus::Inactive => {
                warn!(user_id = %user.id, "login refused: account inactive");
                return Err(AuthError::AccountInactive.into());
            }
        }

        // 4. Allowlist decision, unless the emergency bypass is on.
        if self.config.enforcement_enabled {
            match self.engine.decide(user.id, input.source_addr).await? {
                AccessDecision::Allow { matched } => {
                    info!(user_id = %user.id, source = %input.source_addr,
                          block = %matched.cidr, label = %matched.label,
                          "login allowed by allowlist entry");
                }
                AccessDecision::Deny { reason } => {
                    warn!(user_id = %user.id, source = %input.source_addr,
                          reason = reason.as_str(), "login refused by allowlist");
                    return Err(AuthError::AccessDenied(reason).into());
                }
            }
        } else {
            warn!(user_id = %user.id, source = %input.source_addr,
                  "allowlist enforcement is OFF; login bypassed the decision engine");
        }

        // 5. Issue the session. The cookie is constructed only after
        //    the row is durably created.
        let raw_token = token::generate_session_token();
        let token_hash = token::hash_session_token(&raw_token);
        let expires_at =
            Utc::now() + Duration::seconds(self.config.session_lifetime_secs as i64);

        let session = self
            .session_repo
            .create(CreateSession {
                user_id: user.id,
                token_hash,
                source_addr: input.source_addr,
                secure: true,
                http_only: true,
                expires_at,
            })
            .await?;

        let cookie = SessionCookie::new(
            &self.config.cookie_name,
            &raw_token,
            self.config.session_lifetime_secs,
            self.config.same_site,
        );

        info!(user_id = %user.id, session_id = %session.id,
              expires_at = %session.expires_at, "session issued");

        Ok(SessionArtifact {
            token: raw_token,
            session_id: session.id,
            expires_at: session.expires_at,
            cookie,
        })
    }

    /// Validate an existing session token presented from `source_addr`.
    ///
    /// An expired session is invalidated here, on the request that
    /// observed the expiry. Under the strict address policy a source
    /// mismatch refuses validation, forcing re-authentication.
    pub async fn validate(&self, raw_token: &str, source_addr: IpAddr) -> LendgateResult<Session> {
        let token_hash = token::hash_session_token(raw_token);

        let session = match self.session_repo.get_by_token_hash(&token_hash).await {
            Ok(s) => s,
            Err(LendgateError::NotFound { .. }) => {
                return Err(AuthError::SessionInvalid.into());
            }
            Err(e) => return Err(e),
        };

        if session.is_expired(Utc::now()) {
            // Invalidate the expired session and reject.
            let _ = self.session_repo.invalidate(session.id).await;
            warn!(session_id = %session.id, user_id = %session.user_id,
                  "session expired");
            return Err(AuthError::SessionExpired.into());
        }

        if session.source_addr != source_addr {
            match self.config.address_policy {
                AddressPolicy::Strict => {
                    warn!(session_id = %session.id, user_id = %session.user_id,
                          issued_from = %session.source_addr, now_from = %source_addr,
                          "session source address changed; forcing re-authentication");
                    return Err(AuthError::AddressMismatch.into());
                }
                AddressPolicy::Lenient => {
                    warn!(session_id = %session.id, user_id = %session.user_id,
                          issued_from = %session.source_addr, now_from = %source_addr,
                          "session source address changed; allowed by lenient policy");
                }
            }
        }

        Ok(session)
    }

    /// Revoke the session for a raw token. Idempotent on unknown or
    /// already-revoked tokens.
    pub async fn revoke(&self, raw_token: &str) -> LendgateResult<()> {
        let token_hash = token::hash_session_token(raw_token);
        self.session_repo.delete_by_token_hash(&token_hash).await
    }

    /// Invalidate a single session by id (logout).
    pub async fn logout(&self, session_id: Uuid) -> LendgateResult<()> {
        self.session_repo.invalidate(session_id).await
    }

    /// Revoke all sessions for a user (e.g. on password change or
    /// administrative lockout).
    pub async fn revoke_all_sessions(&self, user_id: Uuid) -> LendgateResult<()> {
        self.session_repo.invalidate_user_sessions(user_id).await
    }
}
