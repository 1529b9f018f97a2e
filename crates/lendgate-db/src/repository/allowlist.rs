//! SurrealDB implementation of [`AllowlistRepository`].
//!
//! The record id is derived deterministically from the (user, block)
//! pair, so concurrent upserts for the same pair converge on a single
//! record through the store's own `UPSERT` primitive — no
//! application-level locking. A UNIQUE index on (user_id, cidr) backs
//! the same invariant at the schema level.

use chrono::{DateTime, Utc};
use ipnet::IpNet;
use lendgate_core::error::LendgateResult;
use lendgate_core::models::allowlist::{AllowlistEntry, UpsertAllowlistEntry};
use lendgate_core::repository::AllowlistRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct AllowlistRow {
    user_id: String,
    cidr: String,
    label: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AllowlistRow {
    fn try_into_entry(self) -> Result<AllowlistEntry, DbError> {
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        let cidr = self
            .cidr
            .parse::<IpNet>()
            .map_err(|e| DbError::Decode(format!("invalid stored CIDR '{}': {e}", self.cidr)))?;
        Ok(AllowlistEntry {
            user_id,
            cidr,
            label: self.label,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Deterministic record id for a (user, block) pair.
fn record_key(user_id: Uuid, block: &IpNet) -> String {
    format!("{user_id}|{block}")
}

/// SurrealDB implementation of the Allowlist repository.
#[derive(Clone)]
pub struct SurrealAllowlistRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAllowlistRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AllowlistRepository for SurrealAllowlistRepository<C> {
    async fn upsert(&self, input: UpsertAllowlistEntry) -> LendgateResult<AllowlistEntry> {
        let key = record_key(input.user_id, &input.cidr);

        let result = self
            .db
            .query(
                "UPSERT type::record('allowlist_entry', $key) SET \
                 user_id = $user_id, \
                 cidr = $cidr, \
                 label = $label, \
                 active = true, \
                 updated_at = time::now()",
            )
            .bind(("key", key.clone()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("cidr", input.cidr.to_string()))
            .bind(("label", input.label))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(DbError::from)?;

        let rows: Vec<AllowlistRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "allowlist_entry".into(),
            id: key,
        })?;

        Ok(row.try_into_entry()?)
    }

    async fn deactivate(&self, user_id: Uuid, block: &IpNet) -> LendgateResult<()> {
        // UPDATE on a missing record is a no-op, which makes this
        // idempotent by construction.
        self.db
            .query(
                "UPDATE type::record('allowlist_entry', $key) SET \
                 active = false, updated_at = time::now()",
            )
            .bind(("key", record_key(user_id, block)))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list_active(&self, user_id: Uuid) -> LendgateResult<Vec<AllowlistEntry>> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM allowlist_entry \
                 WHERE user_id = $user_id AND active = true \
                 ORDER BY created_at ASC",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AllowlistRow> = result.take(0).map_err(DbError::from)?;

        let entries = rows
            .into_iter()
            .map(|row| row.try_into_entry())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(entries)
    }
}
