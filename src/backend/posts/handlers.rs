/**
 * Post Handlers
 *
 * Every post route requires authentication.
 *
 * # Routes
 *
 * - `GET /api/posts` - all posts, newest first
 * - `GET /api/posts/{id}` - one post
 * - `POST /api/posts` - create a post
 * - `DELETE /api/posts/{id}` - delete own post
 * - `PUT /api/posts/like/{id}` - like a post
 * - `PUT /api/posts/unlike/{id}` - withdraw a like
 * - `POST /api/posts/comment/{id}` - comment on a post
 * - `DELETE /api/posts/{id}/comment/{comment_id}` - delete own comment
 *
 * Like and comment changes answer with the updated list only.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::backend::auth::ownership::require_owner;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::posts::types::{PostRemoved, TextRequest};
use crate::backend::store::DynStore;
use crate::backend::validation::{parse_id, JsonBody, Validator};
use crate::shared::{Comment, Like, Post, User};

pub const POST_NOT_FOUND: &str = "Post not found";
pub const COMMENT_NOT_FOUND: &str = "Comment does not exist";
pub const TEXT_REQUIRED: &str = "Text is required";
pub const POST_REMOVED: &str = "Post removed";
pub const AUTHOR_NOT_FOUND: &str = "User not found";

async fn load_post(store: &DynStore, raw_id: &str) -> Result<Post, BackendError> {
    let id = parse_id(raw_id, POST_NOT_FOUND)?;
    store
        .find_post(id)
        .await?
        .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))
}

async fn load_author(store: &DynStore, user_id: Uuid) -> Result<User, BackendError> {
    store
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(AUTHOR_NOT_FOUND))
}

fn required_text(request: TextRequest) -> Result<String, BackendError> {
    let mut v = Validator::new();
    let text = v.required("text", request.text.as_deref(), TEXT_REQUIRED);
    v.finish()?;
    Ok(text)
}

/// GET /api/posts
pub async fn list_posts(
    State(store): State<DynStore>,
    AuthUser(_identity): AuthUser,
) -> Result<Json<Vec<Post>>, BackendError> {
    Ok(Json(store.list_posts().await?))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(store): State<DynStore>,
    AuthUser(_identity): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, BackendError> {
    Ok(Json(load_post(&store, &post_id).await?))
}

/// POST /api/posts
///
/// The author's name and avatar are copied into the post.
pub async fn create_post(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    JsonBody(request): JsonBody<TextRequest>,
) -> Result<Json<Post>, BackendError> {
    let text = required_text(request)?;
    let author = load_author(&store, identity.user_id).await?;

    let post = Post::new(&author, text);
    store.save_post(&post).await?;

    tracing::info!("Post {} created by {}", post.id, author.id);

    Ok(Json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<PostRemoved>, BackendError> {
    let post = load_post(&store, &post_id).await?;
    require_owner(&post, &identity)?;

    let post = store
        .delete_post(post.id)
        .await?
        .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))?;

    tracing::info!("Post {} removed by {}", post.id, identity.user_id);

    Ok(Json(PostRemoved {
        msg: POST_REMOVED,
        post,
    }))
}

/// PUT /api/posts/like/{id}
///
/// `400 "Post already Liked"` when the caller has liked the post before.
pub async fn like_post(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Like>>, BackendError> {
    let mut post = load_post(&store, &post_id).await?;

    post.like(identity.user_id).inspect_err(|e| {
        tracing::warn!("Like on {} by {} rejected: {}", post.id, identity.user_id, e)
    })?;
    store.save_post(&post).await?;

    Ok(Json(post.likes))
}

/// PUT /api/posts/unlike/{id}
///
/// `400 "Post has not yet been liked"` when there is no like to withdraw.
pub async fn unlike_post(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Like>>, BackendError> {
    let mut post = load_post(&store, &post_id).await?;

    post.unlike(identity.user_id).inspect_err(|e| {
        tracing::warn!("Unlike on {} by {} rejected: {}", post.id, identity.user_id, e)
    })?;
    store.save_post(&post).await?;

    Ok(Json(post.likes))
}

/// POST /api/posts/comment/{id}
pub async fn add_comment(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    Path(post_id): Path<String>,
    JsonBody(request): JsonBody<TextRequest>,
) -> Result<Json<Vec<Comment>>, BackendError> {
    let text = required_text(request)?;
    let author = load_author(&store, identity.user_id).await?;
    let mut post = load_post(&store, &post_id).await?;

    post.add_comment(Comment::new(&author, text));
    store.save_post(&post).await?;

    tracing::info!("Comment added to {} by {}", post.id, author.id);

    Ok(Json(post.comments))
}

/// DELETE /api/posts/{id}/comment/{comment_id}
///
/// Only the comment's author may delete it; owning the post is not enough.
pub async fn delete_comment(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, BackendError> {
    let mut post = load_post(&store, &post_id).await?;
    let comment_id = parse_id(&comment_id, COMMENT_NOT_FOUND)?;

    let comment = post
        .comment(comment_id)
        .ok_or_else(|| BackendError::not_found(COMMENT_NOT_FOUND))?;
    require_owner(comment, &identity)?;

    post.remove_comment(comment_id);
    store.save_post(&post).await?;

    tracing::info!("Comment {} removed from {}", comment_id, post.id);

    Ok(Json(post.comments))
}
