//! Owner-scoped post use-cases.

use std::sync::Arc;

use crate::domain::{Post, PostDraft, PostId, UserId};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::ports::PostRepository;

const POST: &str = "Post";

/// Post use-cases on top of a [`PostRepository`].
///
/// Translates repository results into [`DomainError`]: a missing row and a
/// row owned by someone else both become `NotFound("Post")`.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner_id: UserId, term: &str) -> DomainResult<Vec<Post>> {
        self.repo.list(owner_id, term).await.map_err(map_repo_err)
    }

    pub async fn get(&self, id: PostId, owner_id: UserId) -> DomainResult<Post> {
        self.repo
            .find(id, owner_id)
            .await
            .map_err(map_repo_err)?
            .ok_or(DomainError::NotFound(POST))
    }

    pub async fn create(&self, owner_id: UserId, draft: PostDraft) -> DomainResult<Post> {
        self.repo.create(owner_id, draft).await.map_err(map_repo_err)
    }

    pub async fn update(
        &self,
        id: PostId,
        owner_id: UserId,
        draft: PostDraft,
    ) -> DomainResult<Post> {
        self.repo
            .update(id, owner_id, draft)
            .await
            .map_err(map_repo_err)
    }

    pub async fn delete(&self, id: PostId, owner_id: UserId) -> DomainResult<()> {
        self.repo.delete(id, owner_id).await.map_err(map_repo_err)
    }
}

fn map_repo_err(err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound(POST),
        RepoError::Connection(msg) | RepoError::Query(msg) | RepoError::Constraint(msg) => {
            DomainError::Storage(msg)
        }
    }
}
