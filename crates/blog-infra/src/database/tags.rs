//! Tag resolution: get-or-create tag rows and wholesale association replace.
//!
//! The free functions are generic over [`ConnectionTrait`] so the post
//! repository can run them on its own open transaction. [`SeaOrmTagResolver`]
//! wraps each one in a transaction of its own.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};

use blog_core::RepoError;
use blog_core::domain::{PostId, TagId};
use blog_core::ports::TagResolver;

use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::error::map_db_err;
use super::handle::DbHandle;

/// Map each name to a tag id, creating the missing tags.
///
/// Creation is a single `INSERT .. ON CONFLICT (name) DO NOTHING`, so two
/// callers introducing the same new name cannot both insert it. Ids are
/// returned in input order; a repeated name yields its id again.
pub async fn resolve_tags<C>(conn: &C, names: &[String]) -> Result<Vec<TagId>, DbErr>
where
    C: ConnectionTrait,
{
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let distinct: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| seen.insert(*name))
        .collect();

    let rows = distinct.iter().map(|name| tag::ActiveModel {
        name: Set((*name).to_string()),
        ..Default::default()
    });

    match TagEntity::insert_many(rows)
        .on_conflict(OnConflict::column(tag::Column::Name).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await
    {
        Ok(_) | Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e),
    }

    let ids: HashMap<String, TagId> = TagEntity::find()
        .filter(tag::Column::Name.is_in(distinct.iter().copied()))
        .all(conn)
        .await?
        .into_iter()
        .map(|t| (t.name, t.id))
        .collect();

    names
        .iter()
        .map(|name| {
            ids.get(name)
                .copied()
                .ok_or_else(|| DbErr::RecordNotFound(format!("tag '{}'", name)))
        })
        .collect()
}

/// Replace every association of `post_id` with the distinct ids in `tag_ids`.
///
/// Must run inside a transaction for readers to never see the empty set.
pub async fn associate<C>(conn: &C, post_id: PostId, tag_ids: &[TagId]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    clear_post_tags(conn, post_id).await?;

    let mut seen = HashSet::new();
    let rows: Vec<post_tag::ActiveModel> = tag_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .map(|tag_id| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag_id),
        })
        .collect();

    if rows.is_empty() {
        return Ok(());
    }

    PostTagEntity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

/// Resolve `names`, associate them with the post and return the stored names.
pub async fn replace_post_tags<C>(
    conn: &C,
    post_id: PostId,
    names: &[String],
) -> Result<Vec<String>, DbErr>
where
    C: ConnectionTrait,
{
    let ids = resolve_tags(conn, names).await?;
    associate(conn, post_id, &ids).await?;
    tag_names_for_post(conn, post_id).await
}

pub async fn clear_post_tags<C>(conn: &C, post_id: PostId) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let result = PostTagEntity::delete_many()
        .filter(post_tag::Column::PostId.eq(post_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Tag names of one post, sorted by name.
pub async fn tag_names_for_post<C>(conn: &C, post_id: PostId) -> Result<Vec<String>, DbErr>
where
    C: ConnectionTrait,
{
    let mut by_post = tag_names_for_posts(conn, &[post_id]).await?;
    Ok(by_post.remove(&post_id).unwrap_or_default())
}

/// Tag names of several posts in one query, keyed by post id.
/// Posts without tags are absent from the map.
pub async fn tag_names_for_posts<C>(
    conn: &C,
    post_ids: &[PostId],
) -> Result<HashMap<PostId, Vec<String>>, DbErr>
where
    C: ConnectionTrait,
{
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(PostId, String)> = TagEntity::find()
        .select_only()
        .column(post_tag::Column::PostId)
        .column(tag::Column::Name)
        .join(JoinType::InnerJoin, tag::Relation::PostTag.def())
        .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
        .order_by_asc(tag::Column::Name)
        .into_tuple()
        .all(conn)
        .await?;

    let mut by_post: HashMap<PostId, Vec<String>> = HashMap::new();
    for (post_id, name) in rows {
        by_post.entry(post_id).or_default().push(name);
    }
    Ok(by_post)
}

/// [`TagResolver`] backed by SeaORM, one transaction per call.
///
/// For tag maintenance outside a post write, such as imports or admin
/// tooling. [`SeaOrmPostRepository`](super::SeaOrmPostRepository) does not go
/// through it; it calls the free functions on its own transaction so the post
/// row and its tags commit together.
pub struct SeaOrmTagResolver {
    db: DbHandle,
}

impl SeaOrmTagResolver {
    pub fn new(db: DbHandle) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagResolver for SeaOrmTagResolver {
    async fn resolve_tags(&self, names: &[String]) -> Result<Vec<TagId>, RepoError> {
        let txn = self.db.conn().begin().await.map_err(map_db_err)?;
        let ids = resolve_tags(&txn, names).await.map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(tag_count = ids.len(), "Resolved tags");
        Ok(ids)
    }

    async fn associate(&self, post_id: PostId, tag_ids: &[TagId]) -> Result<(), RepoError> {
        let txn = self.db.conn().begin().await.map_err(map_db_err)?;
        associate(&txn, post_id, tag_ids)
            .await
            .map_err(map_db_err)?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(post_id, tag_count = tag_ids.len(), "Replaced post tags");
        Ok(())
    }

    async fn tags_for_post(&self, post_id: PostId) -> Result<Vec<String>, RepoError> {
        tag_names_for_post(self.db.conn(), post_id)
            .await
            .map_err(map_db_err)
    }
}
