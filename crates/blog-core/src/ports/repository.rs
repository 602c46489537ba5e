use async_trait::async_trait;

use crate::domain::{NewUser, Post, PostDraft, PostId, TagId, User, UserId};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Store a new user. Fails with `Constraint` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Owner-scoped post repository.
///
/// Every method filters on both the post id and `owner_id`; a post owned by
/// someone else is reported exactly like a missing one.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts of `owner_id` whose title, content or category contains `term`
    /// (case-insensitive). An empty term matches every post of the owner.
    async fn list(&self, owner_id: UserId, term: &str) -> Result<Vec<Post>, RepoError>;

    async fn find(&self, id: PostId, owner_id: UserId) -> Result<Option<Post>, RepoError>;

    /// Insert the post and its tag associations in one transaction.
    async fn create(&self, owner_id: UserId, draft: PostDraft) -> Result<Post, RepoError>;

    /// Overwrite the post and replace its whole tag set in one transaction.
    /// Fails with `NotFound` when no post matches `id` and `owner_id`.
    async fn update(
        &self,
        id: PostId,
        owner_id: UserId,
        draft: PostDraft,
    ) -> Result<Post, RepoError>;

    /// Fails with `NotFound` when no post matches `id` and `owner_id`.
    async fn delete(&self, id: PostId, owner_id: UserId) -> Result<(), RepoError>;
}

/// Tag get-or-create and post association management.
#[async_trait]
pub trait TagResolver: Send + Sync {
    /// Map each name to a tag id, creating missing tags.
    /// Ids come back in input order.
    async fn resolve_tags(&self, names: &[String]) -> Result<Vec<TagId>, RepoError>;

    /// Replace the post's associations with the distinct ids in `tag_ids`.
    async fn associate(&self, post_id: PostId, tag_ids: &[TagId]) -> Result<(), RepoError>;

    /// Tag names attached to a post, sorted by name.
    async fn tags_for_post(&self, post_id: PostId) -> Result<Vec<String>, RepoError>;
}
