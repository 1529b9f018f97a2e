//! Integration tests for the access decision engine.

use std::net::IpAddr;

use lendgate_auth::AccessEngine;
use lendgate_core::cidr;
use lendgate_core::models::allowlist::UpsertAllowlistEntry;
use lendgate_core::models::decision::{AccessDecision, DenyReason, MatchStrategy};
use lendgate_core::models::user::{CreateUser, UpdateUser, UserRole, UserStatus};
use lendgate_core::repository::{AllowlistRepository, UserRepository};
use lendgate_db::repository::{SurrealAllowlistRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;

/// Spin up in-memory DB, run migrations, create one user.
async fn setup() -> (
    SurrealUserRepository<Db>,
    SurrealAllowlistRepository<Db>,
    Uuid,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    lendgate_db::run_migrations(&db).await.unwrap();

    let user_repo = SurrealUserRepository::new(db.clone());
    let user = user_repo
        .create(CreateUser {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "correct-horse-battery".into(),
            role: UserRole::LoanOfficer,
        })
        .await
        .unwrap();

    (user_repo, SurrealAllowlistRepository::new(db), user.id)
}

fn addr(s: &str) -> IpAddr {
    s.parse().unwrap()
}

async fn add_entry(
    repo: &SurrealAllowlistRepository<Db>,
    user_id: Uuid,
    block: &str,
    label: &str,
) {
    repo.upsert(UpsertAllowlistEntry {
        user_id,
        cidr: cidr::parse_block(block).unwrap(),
        label: label.into(),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn allow_reports_the_matched_entry() {
    let (user_repo, allowlist_repo, user_id) = setup().await;
    add_entry(&allowlist_repo, user_id, "10.0.0.0/24", "Office").await;

    let engine = AccessEngine::new(user_repo, allowlist_repo, MatchStrategy::OrderBased);
    let decision = engine.decide(user_id, addr("10.0.0.5")).await.unwrap();

    match decision {
        AccessDecision::Allow { matched } => {
            assert_eq!(matched.cidr, cidr::parse_block("10.0.0.0/24").unwrap());
            assert_eq!(matched.label, "Office");
        }
        other => panic!("expected Allow, got {other:?}"),
    }
}

#[tokio::test]
async fn address_outside_all_entries_denies_no_match() {
    let (user_repo, allowlist_repo, user_id) = setup().await;
    add_entry(&allowlist_repo, user_id, "10.0.0.0/24", "Office").await;

    let engine = AccessEngine::new(user_repo, allowlist_repo, MatchStrategy::OrderBased);
    let decision = engine.decide(user_id, addr("10.0.1.5")).await.unwrap();

    assert!(matches!(
        decision,
        AccessDecision::Deny {
            reason: DenyReason::NoMatch
        }
    ));
}

#[tokio::test]
async fn zero_entries_denies_regardless_of_address() {
    let (user_repo, allowlist_repo, user_id) = setup().await;

    let engine = AccessEngine::new(user_repo, allowlist_repo, MatchStrategy::OrderBased);
    for source in ["10.0.0.5", "127.0.0.1", "2001:db8::1"] {
        let decision = engine.decide(user_id, addr(source)).await.unwrap();
        assert!(
            matches!(
                decision,
                AccessDecision::Deny {
                    reason: DenyReason::NoEntries
                }
            ),
            "expected NoEntries for {source}"
        );
    }
}

#[tokio::test]
async fn inactive_user_denied_even_with_matching_entry() {
    let (user_repo, allowlist_repo, user_id) = setup().await;
    add_entry(&allowlist_repo, user_id, "10.0.0.0/24", "Office").await;

    user_repo
        .update(
            user_id,
            UpdateUser {
                status: Some(UserStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let engine = AccessEngine::new(user_repo, allowlist_repo, MatchStrategy::OrderBased);
    let decision = engine.decide(user_id, addr("10.0.0.5")).await.unwrap();

    assert!(matches!(
        decision,
        AccessDecision::Deny {
            reason: DenyReason::UserInactive
        }
    ));
}

#[tokio::test]
async fn unknown_user_denied_as_inactive() {
    let (user_repo, allowlist_repo, _user_id) = setup().await;

    let engine = AccessEngine::new(user_repo, allowlist_repo, MatchStrategy::OrderBased);
    let decision = engine
        .decide(Uuid::new_v4(), addr("10.0.0.5"))
        .await
        .unwrap();

    // Missing and disabled accounts are indistinguishable.
    assert!(matches!(
        decision,
        AccessDecision::Deny {
            reason: DenyReason::UserInactive
        }
    ));
}

#[tokio::test]
async fn deactivated_entry_no_longer_matches() {
    let (user_repo, allowlist_repo, user_id) = setup().await;
    add_entry(&allowlist_repo, user_id, "10.0.0.0/24", "Office").await;
    add_entry(&allowlist_repo, user_id, "192.168.0.0/16", "Home").await;

    allowlist_repo
        .deactivate(user_id, &cidr::parse_block("10.0.0.0/24").unwrap())
        .await
        .unwrap();

    // Decisions re-read current entries — no caching staleness.
    let engine = AccessEngine::new(user_repo, allowlist_repo, MatchStrategy::OrderBased);
    let decision = engine.decide(user_id, addr("10.0.0.5")).await.unwrap();

    assert!(matches!(
        decision,
        AccessDecision::Deny {
            reason: DenyReason::NoMatch
        }
    ));
}

#[tokio::test]
async fn overlapping_blocks_order_based_takes_creation_order() {
    let (user_repo, allowlist_repo, user_id) = setup().await;
    add_entry(&allowlist_repo, user_id, "10.0.0.0/8", "Wide").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    add_entry(&allowlist_repo, user_id, "10.0.0.0/24", "Narrow").await;

    let engine = AccessEngine::new(user_repo, allowlist_repo, MatchStrategy::OrderBased);
    match engine.decide(user_id, addr("10.0.0.5")).await.unwrap() {
        AccessDecision::Allow { matched } => assert_eq!(matched.label, "Wide"),
        other => panic!("expected Allow, got {other:?}"),
    }
}

#[tokio::test]
async fn overlapping_blocks_most_specific_first_prefers_longest_prefix() {
    let (user_repo, allowlist_repo, user_id) = setup().await;
    add_entry(&allowlist_repo, user_id, "10.0.0.0/8", "Wide").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    add_entry(&allowlist_repo, user_id, "10.0.0.0/24", "Narrow").await;

    let engine = AccessEngine::new(
        user_repo,
        allowlist_repo,
        MatchStrategy::MostSpecificFirst,
    );
    match engine.decide(user_id, addr("10.0.0.5")).await.unwrap() {
        AccessDecision::Allow { matched } => assert_eq!(matched.label, "Narrow"),
        other => panic!("expected Allow, got {other:?}"),
    }
}
