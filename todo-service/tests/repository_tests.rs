mod common;

use chrono::Duration;
use chrono::Utc;
use common::insert_task;
use common::test_pool;
use todo_service::domain::task::ports::TaskRepository;
use todo_service::domain::user::models::EmailAddress;
use todo_service::domain::user::models::NewUser;
use todo_service::domain::user::models::UserId;
use todo_service::domain::user::models::UserProfile;
use todo_service::domain::user::ports::UserRepository;
use todo_service::outbound::repositories::SqliteTaskRepository;
use todo_service::outbound::repositories::SqliteUserRepository;
use todo_service::user::errors::UserError;

fn profile(email: &str) -> UserProfile {
    UserProfile::new(email.to_string(), "Ada".to_string(), "Lovelace".to_string()).unwrap()
}

#[tokio::test]
async fn test_create_and_find_user() {
    let repository = SqliteUserRepository::new(test_pool().await);

    let created = repository
        .create(NewUser::local(
            profile("ada@example.com"),
            "$argon2id$stub".to_string(),
        ))
        .await
        .unwrap();

    let by_id = repository.find_by_id(&created.id).await.unwrap().unwrap();
    let by_email = repository
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(by_id.id, created.id);
    assert_eq!(by_email.id, created.id);
    assert_eq!(
        by_id.email,
        EmailAddress::new("ada@example.com".to_string()).unwrap()
    );
    assert_eq!(by_id.password_hash, "$argon2id$stub");
    assert!(!by_id.oauth_user);
    assert!(by_id.picture_url.is_none());
}

#[tokio::test]
async fn test_create_oauth_user_keeps_picture() {
    let repository = SqliteUserRepository::new(test_pool().await);

    let created = repository
        .create(NewUser::oauth(
            profile("ada@example.com"),
            Some("https://example.com/ada.png".to_string()),
        ))
        .await
        .unwrap();

    let found = repository.find_by_id(&created.id).await.unwrap().unwrap();

    assert!(found.oauth_user);
    assert!(found.password_hash.is_empty());
    assert_eq!(
        found.picture_url.as_deref(),
        Some("https://example.com/ada.png")
    );
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repository = SqliteUserRepository::new(test_pool().await);
    let first = repository
        .create(NewUser::local(profile("ada@example.com"), "hash-1".to_string()))
        .await
        .unwrap();

    let result = repository
        .create(NewUser::local(profile("ada@example.com"), "hash-2".to_string()))
        .await;

    assert!(matches!(result, Err(UserError::EmailAlreadyExists(email)) if email == "ada@example.com"));

    let still_there = repository
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still_there.id, first.id);
    assert_eq!(still_there.password_hash, "hash-1");
}

#[tokio::test]
async fn test_find_missing_user() {
    let repository = SqliteUserRepository::new(test_pool().await);

    assert!(repository.find_by_id(&UserId(7)).await.unwrap().is_none());
    assert!(repository
        .find_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_list_tasks_for_user() {
    let pool = test_pool().await;
    let users = SqliteUserRepository::new(pool.clone());
    let tasks = SqliteTaskRepository::new(pool.clone());

    let ada = users
        .create(NewUser::local(profile("ada@example.com"), "hash".to_string()))
        .await
        .unwrap();
    let grace = users
        .create(NewUser::local(profile("grace@example.com"), "hash".to_string()))
        .await
        .unwrap();

    let now = Utc::now();
    let older = insert_task(&pool, ada.id.0, "Older", "pending", now - Duration::days(1)).await;
    let newer = insert_task(&pool, ada.id.0, "Newer", "completed", now).await;
    insert_task(&pool, grace.id.0, "Grace's", "pending", now).await;

    let listed = tasks.list_for_user(&ada.id).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id.0, newer);
    assert!(listed[0].is_completed());
    assert_eq!(listed[1].id.0, older);
    assert!(listed.iter().all(|task| task.user_id == ada.id));

    assert!(tasks.list_for_user(&UserId(999)).await.unwrap().is_empty());
}
