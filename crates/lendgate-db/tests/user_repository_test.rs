//! Integration tests for the User repository implementation using
//! in-memory SurrealDB.

use lendgate_core::models::user::{CreateUser, UpdateUser, UserRole, UserStatus};
use lendgate_core::repository::UserRepository;
use lendgate_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    lendgate_db::run_migrations(&db).await.unwrap();
    db
}

fn alice() -> CreateUser {
    CreateUser {
        username: "alice".into(),
        email: "alice@example.com".into(),
        password: "correct-horse-battery".into(),
        role: UserRole::LoanOfficer,
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, UserRole::LoanOfficer);
    assert_eq!(user.status, UserStatus::Active);
    assert!(!user.verified);
    // Raw password is never stored.
    assert_ne!(user.password_hash, "correct-horse-battery");

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.username, user.username);
}

#[tokio::test]
async fn identifier_resolves_username_and_email_interchangeably() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();

    let by_username = repo.get_by_identifier("alice").await.unwrap();
    assert_eq!(by_username.id, user.id);

    let by_email = repo.get_by_identifier("alice@example.com").await.unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn unknown_identifier_is_not_found() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let result = repo.get_by_identifier("nobody").await;
    assert!(matches!(
        result,
        Err(lendgate_core::LendgateError::NotFound { .. })
    ));
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(alice()).await.unwrap();

    let result = repo
        .create(CreateUser {
            username: "alice".into(),
            email: "alice2@example.com".into(),
            password: "another-password".into(),
            role: UserRole::Borrower,
        })
        .await;
    assert!(result.is_err(), "unique username index should reject");
}

#[tokio::test]
async fn update_status_and_verified() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();

    let updated = repo
        .update(
            user.id,
            UpdateUser {
                status: Some(UserStatus::Locked),
                verified: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, UserStatus::Locked);
    assert!(updated.verified);
    assert_eq!(updated.username, "alice"); // unchanged
}

#[tokio::test]
async fn delete_is_soft() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();
    repo.delete(user.id).await.unwrap();

    // Row still exists, but the account is inactive.
    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.status, UserStatus::Inactive);
    assert!(!fetched.is_active());
}
