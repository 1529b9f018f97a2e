//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations live in
//! `lendgate-db`; the auth layer depends only on these traits.

use std::future::Future;

use ipnet::IpNet;
use uuid::Uuid;

use crate::error::LendgateResult;
use crate::models::{
    allowlist::{AllowlistEntry, UpsertAllowlistEntry},
    session::{CreateSession, Session},
    user::{CreateUser, UpdateUser, User},
};

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = LendgateResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = LendgateResult<User>> + Send;
    /// Resolve by username or email, accepted interchangeably.
    fn get_by_identifier(
        &self,
        identifier: &str,
    ) -> impl Future<Output = LendgateResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = LendgateResult<User>> + Send;
    /// Soft-delete: sets status to Inactive.
    fn delete(&self, id: Uuid) -> impl Future<Output = LendgateResult<()>> + Send;
}

pub trait AllowlistRepository: Send + Sync {
    /// Insert a new entry or, if the (user, block) pair already exists,
    /// update the label and force `active = true`, returning the
    /// resulting entry. Atomic with respect to the uniqueness invariant:
    /// concurrent upserts for the same pair converge on one record via
    /// the store's conflict primitive, not application-level locking.
    fn upsert(
        &self,
        input: UpsertAllowlistEntry,
    ) -> impl Future<Output = LendgateResult<AllowlistEntry>> + Send;

    /// Set `active = false`. Idempotent: no error when the entry does
    /// not exist.
    fn deactivate(
        &self,
        user_id: Uuid,
        block: &IpNet,
    ) -> impl Future<Output = LendgateResult<()>> + Send;

    /// Active entries for a user, ordered by creation time ascending.
    /// Empty vec, not an error, when the user has none.
    fn list_active(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = LendgateResult<Vec<AllowlistEntry>>> + Send;
}

pub trait SessionRepository: Send + Sync {
    fn create(&self, input: CreateSession) -> impl Future<Output = LendgateResult<Session>> + Send;
    fn get_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = LendgateResult<Session>> + Send;
    /// Invalidate a single session by id.
    fn invalidate(&self, id: Uuid) -> impl Future<Output = LendgateResult<()>> + Send;
    /// Invalidate by token hash. Idempotent: unknown hashes are a no-op.
    fn delete_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = LendgateResult<()>> + Send;
    /// Invalidate all sessions for a user (e.g., on password change or
    /// administrative revocation).
    fn invalidate_user_sessions(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = LendgateResult<()>> + Send;
    /// Remove all expired sessions. Operator tool — expiry is enforced
    /// per-request, this only reclaims storage.
    fn cleanup_expired(&self) -> impl Future<Output = LendgateResult<u64>> + Send;
}
