#![allow(dead_code)]

use blog_core::domain::{NewUser, PostDraft, UserId};
use blog_core::ports::UserRepository;
use blog_infra::{DatabaseConfig, DbHandle, SeaOrmUserRepository};
use migration::{Migrator, MigratorTrait};
use tempfile::TempDir;

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    pub db: DbHandle,
    _dir: TempDir,
}

pub async fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("blog.db").display());

    let mut config = DatabaseConfig::new(url);
    config.max_connections = 4;
    let db = DbHandle::connect(&config).await.unwrap();
    Migrator::up(db.conn(), None).await.unwrap();

    TestDb { db, _dir: dir }
}

pub async fn seed_user(db: &DbHandle, email: &str) -> UserId {
    SeaOrmUserRepository::new(db.clone())
        .create(NewUser::new(email.to_string(), "hash".to_string()))
        .await
        .unwrap()
        .id
}

pub fn draft(title: &str, content: &str, category: &str, tags: &[&str]) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
