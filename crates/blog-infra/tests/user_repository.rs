mod common;

use blog_core::RepoError;
use blog_core::domain::NewUser;
use blog_core::ports::UserRepository;
use blog_infra::SeaOrmUserRepository;
use common::setup;

#[tokio::test]
async fn create_and_find_user() {
    let t = setup().await;
    let repo = SeaOrmUserRepository::new(t.db.clone());

    let user = repo
        .create(NewUser::new("alice@example.com".into(), "hash".into()))
        .await
        .unwrap();

    let by_email = repo.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "alice@example.com");

    assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_constraint_violation() {
    let t = setup().await;
    let repo = SeaOrmUserRepository::new(t.db.clone());

    repo.create(NewUser::new("alice@example.com".into(), "hash".into()))
        .await
        .unwrap();
    let err = repo
        .create(NewUser::new("alice@example.com".into(), "other".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
}
