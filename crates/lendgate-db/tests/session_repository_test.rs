//! Integration tests for the Session repository implementation using
//! in-memory SurrealDB.

use chrono::{Duration, Utc};
use lendgate_core::models::session::CreateSession;
use lendgate_core::models::user::{CreateUser, UserRole};
use lendgate_core::repository::{SessionRepository, UserRepository};
use lendgate_db::repository::{SurrealSessionRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> (
    SurrealSessionRepository<surrealdb::engine::local::Db>,
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

    (SurrealSessionRepository::new(db), user.id)
}

fn session_input(user_id: Uuid, token_hash: &str, ttl_hours: i64) -> CreateSession {
    CreateSession {
        user_id,
        token_hash: token_hash.into(),
        source_addr: "10.0.0.5".parse().unwrap(),
        secure: true,
        http_only: true,
        expires_at: Utc::now() + Duration::hours(ttl_hours),
    }
}

#[tokio::test]
async fn create_and_get_by_token_hash() {
    let (repo, user_id) = setup().await;

    let session = repo
        .create(session_input(user_id, "hash-a", 24))
        .await
        .unwrap();
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.source_addr, "10.0.0.5".parse::<std::net::IpAddr>().unwrap());
    assert!(session.secure);
    assert!(session.http_only);

    let fetched = repo.get_by_token_hash("hash-a").await.unwrap();
    assert_eq!(fetched.id, session.id);
    assert_eq!(fetched.token_hash, "hash-a");
}

#[tokio::test]
async fn invalidate_removes_session() {
    let (repo, user_id) = setup().await;

    let session = repo
        .create(session_input(user_id, "hash-b", 24))
        .await
        .unwrap();
    repo.invalidate(session.id).await.unwrap();

    let result = repo.get_by_token_hash("hash-b").await;
    assert!(matches!(
        result,
        Err(lendgate_core::LendgateError::NotFound { .. })
    ));
}

#[tokio::test]
async fn delete_by_token_hash_is_idempotent() {
    let (repo, user_id) = setup().await;

    repo.create(session_input(user_id, "hash-c", 24))
        .await
        .unwrap();

    repo.delete_by_token_hash("hash-c").await.unwrap();
    // Again on the now-missing hash, and on one that never existed.
    repo.delete_by_token_hash("hash-c").await.unwrap();
    repo.delete_by_token_hash("never-existed").await.unwrap();

    assert!(repo.get_by_token_hash("hash-c").await.is_err());
}

#[tokio::test]
async fn invalidate_user_sessions_removes_all() {
    let (repo, user_id) = setup().await;

    repo.create(session_input(user_id, "hash-1", 24))
        .await
        .unwrap();
    repo.create(session_input(user_id, "hash-2", 24))
        .await
        .unwrap();

    repo.invalidate_user_sessions(user_id).await.unwrap();

    assert!(repo.get_by_token_hash("hash-1").await.is_err());
    assert!(repo.get_by_token_hash("hash-2").await.is_err());
}

#[tokio::test]
async fn cleanup_expired_counts_only_expired_sessions() {
    let (repo, user_id) = setup().await;

    repo.create(session_input(user_id, "live", 24))
        .await
        .unwrap();
    repo.create(session_input(user_id, "stale", -1))
        .await
        .unwrap();

    let removed = repo.cleanup_expired().await.unwrap();
    assert_eq!(removed, 1);

    assert!(repo.get_by_token_hash("live").await.is_ok());
    assert!(repo.get_by_token_hash("stale").await.is_err());
}
