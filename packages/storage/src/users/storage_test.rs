// ABOUTME: Tests for user storage layer
// ABOUTME: Verifies account creation, lookups, and uniqueness of email and username

use super::storage::UserStorage;
use super::types::{NewUser, PublicUser};
use crate::{DbState, StorageError};

fn new_user(email: &str, username: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        username: username.to_string(),
        hashed_password: "$argon2id$placeholder".to_string(),
        full_name: Some("Test User".to_string()),
    }
}

async fn setup() -> UserStorage {
    let db = DbState::in_memory().await.unwrap();
    UserStorage::new(db.pool)
}

#[tokio::test]
async fn test_create_and_fetch_user() {
    let storage = setup().await;

    let user = storage
        .create_user(new_user("learner@example.com", "learner"))
        .await
        .unwrap();

    assert!(user.id > 0);
    assert_eq!(user.email, "learner@example.com");
    assert!(user.updated_at.is_none());

    let by_id = storage.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "learner");

    let by_email = storage
        .get_user_by_email("learner@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, user.id);

    assert!(storage.get_user(user.id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_reported() {
    let storage = setup().await;
    storage
        .create_user(new_user("dup@example.com", "first"))
        .await
        .unwrap();

    let err = storage
        .create_user(new_user("dup@example.com", "second"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Duplicate("email")));
}

#[tokio::test]
async fn test_duplicate_username_is_reported() {
    let storage = setup().await;
    storage
        .create_user(new_user("one@example.com", "taken"))
        .await
        .unwrap();

    let err = storage
        .create_user(new_user("two@example.com", "taken"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Duplicate("username")));
}

#[tokio::test]
async fn test_existence_checks() {
    let storage = setup().await;
    storage
        .create_user(new_user("exists@example.com", "exists"))
        .await
        .unwrap();

    assert!(storage.email_exists("exists@example.com").await.unwrap());
    assert!(!storage.email_exists("missing@example.com").await.unwrap());
    assert!(storage.username_exists("exists").await.unwrap());
    assert!(!storage.username_exists("missing").await.unwrap());
}

#[tokio::test]
async fn test_public_user_drops_password_hash() {
    let storage = setup().await;
    let user = storage
        .create_user(new_user("public@example.com", "public"))
        .await
        .unwrap();

    let json = serde_json::to_value(PublicUser::from(user)).unwrap();
    assert!(json.get("hashed_password").is_none());
    assert_eq!(json["username"], "public");
}
