//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::ports::UserRepository;
use blog_infra::{DbHandle, SeaOrmPostRepository, SeaOrmUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: Arc<dyn UserRepository>,
    pub db: DbHandle,
}

impl AppState {
    /// Wire the SeaORM repositories onto one database handle.
    pub fn new(db: DbHandle) -> Self {
        let posts = PostService::new(Arc::new(SeaOrmPostRepository::new(db.clone())));
        let users = Arc::new(SeaOrmUserRepository::new(db.clone()));

        tracing::info!("Application state initialized");

        Self { posts, users, db }
    }
}
