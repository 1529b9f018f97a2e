//! Audited allowlist administration.
//!
//! The narrow, logged replacement for mutating allowlist rows from ad
//! hoc trusted scripts: every mutation is validated before it reaches
//! the store and names the acting administrator in the audit log.
//! `InvalidBlock` and `UserNotFound` are operator-facing and reported
//! with full detail, unlike the uniform denial at the login boundary.

use lendgate_core::cidr;
use lendgate_core::error::LendgateResult;
use lendgate_core::models::allowlist::{AllowlistEntry, UpsertAllowlistEntry};
use lendgate_core::repository::{AllowlistRepository, UserRepository};
use tracing::info;
use uuid::Uuid;

pub struct AllowlistAdmin<U: UserRepository, A: AllowlistRepository> {
    user_repo: U,
    allowlist_repo: A,
}

impl<U: UserRepository, A: AllowlistRepository> AllowlistAdmin<U, A> {
    pub fn new(user_repo: U, allowlist_repo: A) -> Self {
        Self {
            user_repo,
            allowlist_repo,
        }
    }

    /// Insert or refresh the entry for (user, block). Re-adding an
    /// existing block updates its label and reactivates it.
    pub async fn upsert(
        &self,
        actor: &str,
        user_id: Uuid,
        block: &str,
        label: &str,
    ) -> LendgateResult<AllowlistEntry> {
        // Malformed blocks are refused here, before anything is stored.
        let cidr = cidr::parse_block(block)?;
        let user = self.user_repo.get_by_id(user_id).await?;

        let entry = self
            .allowlist_repo
            .upsert(UpsertAllowlistEntry {
                user_id: user.id,
                cidr,
                label: label.to_string(),
            })
            .await?;

        info!(actor, user_id = %user.id, block = %entry.cidr, label = %entry.label,
              "allowlist entry upserted");
        Ok(entry)
    }

    /// Deactivate the entry for (user, block). Idempotent: succeeds
    /// when the entry does not exist.
    pub async fn deactivate(&self, actor: &str, user_id: Uuid, block: &str) -> LendgateResult<()> {
        let cidr = cidr::parse_block(block)?;
        let user = self.user_repo.get_by_id(user_id).await?;

        self.allowlist_repo.deactivate(user.id, &cidr).await?;

        info!(actor, user_id = %user.id, block = %cidr, "allowlist entry deactivated");
        Ok(())
    }

    /// Active entries for a user, in creation order.
    pub async fn list_active(&self, user_id: Uuid) -> LendgateResult<Vec<AllowlistEntry>> {
        let user = self.user_repo.get_by_id(user_id).await?;
        self.allowlist_repo.list_active(user.id).await
    }
}
