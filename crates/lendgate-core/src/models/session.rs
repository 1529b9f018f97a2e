//! Session domain model.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    /// SHA-256 hex of the raw opaque token. The raw token is never stored.
    pub token_hash: String,
    /// Source address of the request the session was issued for.
    pub source_addr: IpAddr,
    /// Transport flags recorded at issuance.
    pub secure: bool,
    pub http_only: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Expiry is enforced on every validation call, not by a sweep.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    pub user_id: Uuid,
    pub token_hash: String,
    pub source_addr: IpAddr,
    pub secure: bool,
    pub http_only: bool,
    pub expires_at: DateTime<Utc>,
}
