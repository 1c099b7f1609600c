mod common;

use common::key_pair;
use common::TestDb;
use sso_service::domain::auth::errors::StorageError;
use sso_service::domain::auth::models::App;
use sso_service::domain::auth::models::AppId;
use sso_service::domain::auth::models::UserId;
use sso_service::domain::auth::ports::AppProvider;
use sso_service::domain::auth::ports::UserProvider;
use sso_service::domain::auth::ports::UserSaver;

#[tokio::test]
async fn test_save_and_find_user() {
    let db = TestDb::new().await;
    let hash = vec![7u8; 32];
    let salt = vec![3u8; 16];

    let user_id = db
        .directory
        .save_user("a@x.com", &hash, &salt)
        .await
        .expect("Failed to save user");

    let user = db
        .directory
        .find_user_by_email("a@x.com")
        .await
        .expect("Failed to find user");

    assert_eq!(user.id, user_id);
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.password_hash, hash);
    assert_eq!(user.password_salt, salt);
    assert!(!user.is_admin);
}

#[tokio::test]
async fn test_save_duplicate_email() {
    let db = TestDb::new().await;
    db.directory
        .save_user("a@x.com", &[1u8; 32], &[1u8; 16])
        .await
        .expect("Failed to save user");

    let result = db
        .directory
        .save_user("a@x.com", &[2u8; 32], &[2u8; 16])
        .await;

    assert_eq!(result, Err(StorageError::UserExists("a@x.com".to_string())));
    assert_eq!(db.count_users().await, 1);
}

#[tokio::test]
async fn test_find_missing_user() {
    let db = TestDb::new().await;

    let result = db.directory.find_user_by_email("nobody@x.com").await;

    assert!(matches!(result, Err(StorageError::UserNotFound(_))));
}

#[tokio::test]
async fn test_is_admin_flag() {
    let db = TestDb::new().await;
    let user_id = db
        .directory
        .save_user("a@x.com", &[1u8; 32], &[1u8; 16])
        .await
        .expect("Failed to save user");

    assert_eq!(db.directory.is_admin(user_id).await, Ok(false));

    db.promote_to_admin(user_id.0).await;

    assert_eq!(db.directory.is_admin(user_id).await, Ok(true));
    assert!(matches!(
        db.directory.is_admin(UserId(user_id.0 + 1)).await,
        Err(StorageError::UserNotFound(_))
    ));
}

#[tokio::test]
async fn test_find_app() {
    let db = TestDb::new().await;
    db.provision_app(1, "Test").await;

    let app = db
        .directory
        .find_app_by_id(AppId(1))
        .await
        .expect("Failed to find app");

    assert_eq!(app.id, AppId(1));
    assert_eq!(app.name, "Test");
    assert_eq!(app.private_key, key_pair().private_key);
    assert_eq!(app.public_key, key_pair().public_key);
}

#[tokio::test]
async fn test_find_missing_app() {
    let db = TestDb::new().await;

    let result = db.directory.find_app_by_id(AppId(42)).await;

    assert_eq!(result, Err(StorageError::AppNotFound(42)));
}

#[tokio::test]
async fn test_upsert_app_replaces_existing() {
    let db = TestDb::new().await;
    db.provision_app(1, "Test").await;

    db.directory
        .upsert_app(&App {
            id: AppId(1),
            name: "Renamed".to_string(),
            private_key: "private".to_string(),
            public_key: "public".to_string(),
        })
        .await
        .expect("Failed to upsert app");

    let app = db
        .directory
        .find_app_by_id(AppId(1))
        .await
        .expect("Failed to find app");

    assert_eq!(app.name, "Renamed");
    assert_eq!(app.private_key, "private");
    assert_eq!(app.public_key, "public");
}
