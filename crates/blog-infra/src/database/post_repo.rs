//! SeaORM post repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{BinOper, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use blog_core::RepoError;
use blog_core::domain::{Post, PostDraft, PostId, UserId};
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::error::map_db_err;
use super::handle::DbHandle;
use super::tags;

/// Owner-scoped post repository.
///
/// Writes that touch both `post` and `post_tags` share one transaction.
/// Reads run in a transaction too, so a post and its tags come from the
/// same snapshot.
pub struct SeaOrmPostRepository {
    db: DbHandle,
}

impl SeaOrmPostRepository {
    pub fn new(db: DbHandle) -> Self {
        Self { db }
    }
}

const LIKE_ESCAPE: char = '!';

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive substring match on title, content or category.
/// `None` for an empty term, which matches everything.
///
/// Both sides are folded by the database's `LOWER`, so column and pattern
/// always agree. SQLite only folds ASCII; PostgreSQL folds per locale.
fn search_condition(term: &str) -> Option<Condition> {
    if term.is_empty() {
        return None;
    }

    let pattern = format!("%{}%", escape_like(term));
    let column_matches = |column: post::Column| -> SimpleExpr {
        let lowered: SimpleExpr = Func::lower(Expr::val(pattern.clone())).into();
        let escaped = lowered.binary(BinOper::Escape, SimpleExpr::Constant(LIKE_ESCAPE.into()));
        Expr::expr(Func::lower(Expr::col((PostEntity, column)))).binary(BinOper::Like, escaped)
    };

    Some(
        Condition::any()
            .add(column_matches(post::Column::Title))
            .add(column_matches(post::Column::Content))
            .add(column_matches(post::Column::Category)),
    )
}

/// `now`, but never earlier than the row's own `created_at`.
fn updated_at_expr(now: DateTimeWithTimeZone) -> SimpleExpr {
    Expr::case(
        Expr::col(post::Column::CreatedAt).gt(Expr::val(now)),
        Expr::col(post::Column::CreatedAt),
    )
    .finally(Expr::val(now))
    .into()
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn list(&self, owner_id: UserId, term: &str) -> Result<Vec<Post>, RepoError> {
        let txn = self.db.conn().begin().await.map_err(map_db_err)?;

        let mut query = PostEntity::find().filter(post::Column::OwnerId.eq(owner_id));
        if let Some(condition) = search_condition(term) {
            query = query.filter(condition);
        }

        let models = query
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&txn)
            .await
            .map_err(map_db_err)?;

        let ids: Vec<PostId> = models.iter().map(|m| m.id).collect();
        let mut tags_by_post = tags::tag_names_for_posts(&txn, &ids)
            .await
            .map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(owner_id, term, count = models.len(), "Listed posts");

        Ok(models
            .into_iter()
            .map(|m| {
                let tags = tags_by_post.remove(&m.id).unwrap_or_default();
                m.into_domain(tags)
            })
            .collect())
    }

    async fn find(&self, id: PostId, owner_id: UserId) -> Result<Option<Post>, RepoError> {
        let txn = self.db.conn().begin().await.map_err(map_db_err)?;

        let Some(model) = PostEntity::find_by_id(id)
            .filter(post::Column::OwnerId.eq(owner_id))
            .one(&txn)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let tags = tags::tag_names_for_post(&txn, model.id)
            .await
            .map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(Some(model.into_domain(tags)))
    }

    async fn create(&self, owner_id: UserId, draft: PostDraft) -> Result<Post, RepoError> {
        let txn = self.db.conn().begin().await.map_err(map_db_err)?;
        let now = Utc::now();

        let model = post::ActiveModel {
            owner_id: Set(owner_id),
            title: Set(draft.title),
            content: Set(draft.content),
            category: Set(draft.category),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        let tags = tags::replace_post_tags(&txn, model.id, &draft.tags)
            .await
            .map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(
            post_id = model.id,
            owner_id,
            tag_count = tags.len(),
            "Created post"
        );
        Ok(model.into_domain(tags))
    }

    async fn update(
        &self,
        id: PostId,
        owner_id: UserId,
        draft: PostDraft,
    ) -> Result<Post, RepoError> {
        let txn = self.db.conn().begin().await.map_err(map_db_err)?;
        let now: DateTimeWithTimeZone = Utc::now().into();

        // Write before reading: on SQLite a deferred transaction that reads
        // first cannot wait for the write lock and fails with SQLITE_BUSY.
        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::val(draft.title).into())
            .col_expr(post::Column::Content, Expr::val(draft.content).into())
            .col_expr(post::Column::Category, Expr::val(draft.category).into())
            .col_expr(post::Column::UpdatedAt, updated_at_expr(now))
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::OwnerId.eq(owner_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        let model = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let tags = tags::replace_post_tags(&txn, model.id, &draft.tags)
            .await
            .map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(post_id = id, owner_id, tag_count = tags.len(), "Updated post");
        Ok(model.into_domain(tags))
    }

    async fn delete(&self, id: PostId, owner_id: UserId) -> Result<(), RepoError> {
        let txn = self.db.conn().begin().await.map_err(map_db_err)?;

        let result = PostEntity::delete_many()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::OwnerId.eq(owner_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        // The foreign key cascades on backends that enforce it.
        tags::clear_post_tags(&txn, id)
            .await
            .map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(post_id = id, owner_id, "Deleted post");
        Ok(())
    }
}
