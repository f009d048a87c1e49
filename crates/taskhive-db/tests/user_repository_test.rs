//! Integration tests for the User repository using in-memory SurrealDB.

use taskhive_core::error::TaskhiveError;
use taskhive_core::models::user::CreateUser;
use taskhive_core::repository::UserRepository;
use taskhive_db::repository::SurrealUserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    taskhive_db::run_migrations(&db).await.unwrap();
    db
}

fn alice() -> CreateUser {
    CreateUser {
        name: "Alice".into(),
        email: "alice@example.com".into(),
        password: "correct-horse-battery".into(),
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();

    assert_eq!(user.name, "Alice");
    assert_eq!(user.email, "alice@example.com");
    assert!(user.refresh_token_hash.is_none());

    // Password should be hashed, not stored in plaintext.
    assert_ne!(user.password_hash, "correct-horse-battery");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.name, "Alice");

    let by_email = repo.get_by_email("alice@example.com").await.unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(alice()).await.unwrap();
    let result = repo
        .create(CreateUser {
            name: "Other Alice".into(),
            ..alice()
        })
        .await;

    assert!(matches!(
        result,
        Err(TaskhiveError::AlreadyExists { .. })
    ));
}

#[tokio::test]
async fn unknown_lookups_return_not_found() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let by_id = repo.get_by_id(Uuid::new_v4()).await;
    assert!(matches!(by_id, Err(TaskhiveError::NotFound { .. })));

    let by_email = repo.get_by_email("nobody@example.com").await;
    assert!(matches!(by_email, Err(TaskhiveError::NotFound { .. })));

    let by_token = repo.get_by_refresh_token_hash("deadbeef").await;
    assert!(matches!(by_token, Err(TaskhiveError::NotFound { .. })));
}

#[tokio::test]
async fn refresh_token_hash_lifecycle() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();

    repo.set_refresh_token_hash(user.id, Some("hash-1".into()))
        .await
        .unwrap();
    let found = repo.get_by_refresh_token_hash("hash-1").await.unwrap();
    assert_eq!(found.id, user.id);

    // Rotation replaces the stored hash.
    repo.set_refresh_token_hash(user.id, Some("hash-2".into()))
        .await
        .unwrap();
    assert!(repo.get_by_refresh_token_hash("hash-1").await.is_err());
    assert!(repo.get_by_refresh_token_hash("hash-2").await.is_ok());

    // Clearing logs the user out everywhere.
    repo.set_refresh_token_hash(user.id, None).await.unwrap();
    assert!(repo.get_by_refresh_token_hash("hash-2").await.is_err());

    let reloaded = repo.get_by_id(user.id).await.unwrap();
    assert!(reloaded.refresh_token_hash.is_none());
}

#[tokio::test]
async fn set_refresh_token_on_unknown_user_is_not_found() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let result = repo
        .set_refresh_token_hash(Uuid::new_v4(), Some("hash".into()))
        .await;
    assert!(matches!(result, Err(TaskhiveError::NotFound { .. })));
}

#[tokio::test]
async fn pepper_changes_the_hash_input() {
    let db = setup().await;
    let repo = SurrealUserRepository::with_pepper(db, "pepper!".into());

    let user = repo.create(alice()).await.unwrap();

    // Verification with the pepper succeeds, without it fails.
    assert!(verify_argon2(&user.password_hash, "correct-horse-battery", Some("pepper!")));
    assert!(!verify_argon2(&user.password_hash, "correct-horse-battery", None));
}

/// Argon2id verification helper mirroring the auth crate, kept local so
/// this crate's tests do not depend on taskhive-auth.
fn verify_argon2(hash: &str, password: &str, pepper: Option<&str>) -> bool {
    use argon2::{Argon2, PasswordVerifier};

    let peppered;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };
    let parsed = argon2::PasswordHash::new(hash).unwrap();
    Argon2::default().verify_password(input, &parsed).is_ok()
}
