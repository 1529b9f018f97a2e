//! Access decision result types.

use serde::{Deserialize, Serialize};

use crate::models::allowlist::AllowlistEntry;

/// Why a decision denied the request. Audit-only: callers at the HTTP
/// boundary see a single uniform denial regardless of the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenyReason {
    /// Account missing, inactive, or locked. Returned before any
    /// allowlist lookup so disabled accounts leak nothing.
    UserInactive,
    /// The user has zero active allowlist entries. An empty allowlist
    /// is closed, not open.
    NoEntries,
    /// No active entry contains the source address.
    NoMatch,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::UserInactive => "user-inactive",
            DenyReason::NoEntries => "no-entries",
            DenyReason::NoMatch => "no-match",
        }
    }
}

/// Result of evaluating a (user, source address) pair. Ephemeral —
/// produced per evaluation, never persisted.
#[derive(Debug, Clone)]
pub enum AccessDecision {
    /// Granted. Every grant is traceable to exactly one active entry.
    Allow { matched: AllowlistEntry },
    Deny { reason: DenyReason },
}

impl AccessDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, AccessDecision::Allow { .. })
    }
}

/// Tie-break among overlapping blocks. Blocks need not be disjoint;
/// the first match under the chosen ordering is reported as the
/// matched entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchStrategy {
    /// Evaluate in creation order.
    #[default]
    OrderBased,
    /// Rank by descending prefix length, so a /32 beats a /24.
    MostSpecificFirst,
}
