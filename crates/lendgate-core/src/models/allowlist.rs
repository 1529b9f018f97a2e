//! Allowlist entry domain model.
//!
//! An entry grants a single user access from one CIDR block. The
//! (user, block) pair is unique; re-adding the same block updates the
//! existing entry instead of duplicating it. Entries are deactivated,
//! never physically deleted, so an operator can reconstruct what was
//! allowed when.

use chrono::{DateTime, Utc};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowlistEntry {
    pub user_id: Uuid,
    /// Canonical CIDR block (host bits zeroed).
    pub cidr: IpNet,
    /// Human label, e.g. "Office VPN".
    pub label: String,
    /// Only active entries participate in access decisions.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertAllowlistEntry {
    pub user_id: Uuid,
    pub cidr: IpNet,
    pub label: String,
}
