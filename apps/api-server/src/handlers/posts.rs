//! Post handlers. Every route is scoped to the authenticated owner.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use blog_core::domain::{Post, PostDraft, PostId};
use blog_shared::{PostRequest, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub term: String,
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        category: post.category,
        tags: post.tags,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn to_draft(body: PostRequest) -> AppResult<PostDraft> {
    PostDraft::parse(body.title, body.content, body.category, body.tags).map_err(Into::into)
}

/// GET /api/posts?term=
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(identity.user_id, &query.term).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner(), identity.user_id).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let draft = to_draft(body.into_inner())?;
    let post = state.posts.create(identity.user_id, draft).await?;

    tracing::info!(post_id = post.id, owner_id = identity.user_id, "Post created");
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<PostId>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let draft = to_draft(body.into_inner())?;
    let post = state
        .posts
        .update(path.into_inner(), identity.user_id, draft)
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id, identity.user_id).await?;

    tracing::info!(post_id = id, owner_id = identity.user_id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
