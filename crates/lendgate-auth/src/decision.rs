//! Access decision engine — allowlist evaluation for a (user, source
//! address) pair.
//!
//! Fail-closed throughout: a missing or disabled account is refused
//! before any allowlist lookup, an empty allowlist denies, and there
//! is no default-allow path. Entries are re-read from the store on
//! every call so a deactivation takes effect on the next decision.

use std::net::IpAddr;

use lendgate_core::cidr;
use lendgate_core::error::{LendgateError, LendgateResult};
use lendgate_core::models::decision::{AccessDecision, DenyReason, MatchStrategy};
use lendgate_core::repository::{AllowlistRepository, UserRepository};
use tracing::debug;
use uuid::Uuid;

/// Access decision engine.
///
/// Generic over repository implementations so the decision logic has
/// no dependency on the database crate.
pub struct AccessEngine<U: UserRepository, A: AllowlistRepository> {
    user_repo: U,
    allowlist_repo: A,
    strategy: MatchStrategy,
}

impl<U: UserRepository, A: AllowlistRepository> AccessEngine<U, A> {
    pub fn new(user_repo: U, allowlist_repo: A, strategy: MatchStrategy) -> Self {
        Self {
            user_repo,
            allowlist_repo,
            strategy,
        }
    }

    /// Decide whether a request from `source_addr` on behalf of
    /// `user_id` is permitted.
    pub async fn decide(
        &self,
        user_id: Uuid,
        source_addr: IpAddr,
    ) -> LendgateResult<AccessDecision> {
        // 1. Resolve the account. Missing and disabled accounts get the
        //    same refusal, with no allowlist lookup performed.
        let user = match self.user_repo.get_by_id(user_id).await {
            Ok(u) => u,
            Err(LendgateError::NotFound { .. }) => {
                return Ok(AccessDecision::Deny {
                    reason: DenyReason::UserInactive,
                });
            }
            Err(e) => return Err(e),
        };
        if !user.is_active() {
            return Ok(AccessDecision::Deny {
                reason: DenyReason::UserInactive,
            });
        }

        // 2. Zero active entries means the allowlist is closed, not
        //    absent.
        let mut entries = self.allowlist_repo.list_active(user_id).await?;
        if entries.is_empty() {
            return Ok(AccessDecision::Deny {
                reason: DenyReason::NoEntries,
            });
        }

        // 3. First match wins under the configured ordering. The sort
        //    is stable, so equally specific blocks keep creation order.
        if self.strategy == MatchStrategy::MostSpecificFirst {
            entries.sort_by(|a, b| b.cidr.prefix_len().cmp(&a.cidr.prefix_len()));
        }

        for entry in entries {
            if cidr::matches(source_addr, &entry.cidr) {
                debug!(
                    user_id = %user_id,
                    source = %source_addr,
                    block = %entry.cidr,
                    "allowlist match"
                );
                return Ok(AccessDecision::Allow { matched: entry });
            }
        }

        // 4. No active entry contains the address.
        Ok(AccessDecision::Deny {
            reason: DenyReason::NoMatch,
        })
    }
}
