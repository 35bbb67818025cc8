use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::validate;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Comment, Like, Post, User};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

/// A syntactically invalid id behaves like a missing resource, not a
/// malformed request.
fn parse_id(raw: &str, missing: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(missing))
}

async fn fetch_post(state: &AppState, id: Uuid) -> Result<Post, ApiError> {
    state
        .store
        .find_post(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))
}

async fn fetch_author(state: &AppState, user_id: Uuid) -> Result<User, ApiError> {
    state
        .store
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// POST /api/posts - Create a post
///
/// The author's name and avatar are snapshotted from the current user
/// record; later profile edits do not rewrite existing posts.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<TextRequest>,
) -> Result<Json<Post>, ApiError> {
    let errors = validate::text_errors(&payload.text);
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let author = fetch_author(&state, auth_user.user_id).await?;
    let post = Post::new(&author, payload.text);
    state.store.insert_post(&post).await?;
    tracing::info!(post_id = %post.id, user_id = %author.id, "post created");

    Ok(Json(post))
}

/// GET /api/posts - All posts, newest first. No pagination.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.store.list_posts().await?))
}

/// GET /api/posts/:id - Single post lookup
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let post_id = parse_id(&id, "Post not found")?;
    Ok(Json(fetch_post(&state, post_id).await?))
}

/// DELETE /api/posts/:id - Remove a post, author only
///
/// Embedded likes and comments go with the document. A repeat call finds
/// nothing and answers 404.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let post_id = parse_id(&id, "Post not found")?;
    let post = fetch_post(&state, post_id).await?;

    if post.user != auth_user.user_id {
        tracing::info!(post_id = %post.id, user_id = %auth_user.user_id, "delete rejected: not author");
        return Err(ApiError::forbidden("User not authorized"));
    }

    state.store.delete_post(post.id).await?;
    tracing::info!(post_id = %post.id, "post removed");

    Ok(Json(json!({ "msg": "Post removed" })))
}

/// PUT /api/posts/like/:id - Like a post
///
/// At most one like per user per post, enforced by the pre-check scan.
/// The repeat-call 400 is the intended guard, not a server fault.
pub async fn like(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let post_id = parse_id(&id, "Post not found")?;
    let mut post = fetch_post(&state, post_id).await?;

    if post.liked_by(auth_user.user_id) {
        return Err(ApiError::AlreadyLiked);
    }

    post.add_like(auth_user.user_id);
    state.store.save_post(&post).await?;

    Ok(Json(post.likes))
}

/// PUT /api/posts/unlike/:id - Withdraw a like
pub async fn unlike(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let post_id = parse_id(&id, "Post not found")?;
    let mut post = fetch_post(&state, post_id).await?;

    if !post.remove_like(auth_user.user_id) {
        return Err(ApiError::NotLiked);
    }

    state.store.save_post(&post).await?;

    Ok(Json(post.likes))
}

/// POST /api/posts/comment/:id - Comment on a post
///
/// The post existence check runs before any mutation.
pub async fn comment(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<TextRequest>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let errors = validate::text_errors(&payload.text);
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let post_id = parse_id(&id, "Post not found")?;
    let mut post = fetch_post(&state, post_id).await?;
    let author = fetch_author(&state, auth_user.user_id).await?;

    post.add_comment(&author, payload.text);
    state.store.save_post(&post).await?;

    Ok(Json(post.comments))
}

/// DELETE /api/posts/comment/:id/:comment_id - Remove a comment, its
/// author only. Removal is keyed by the comment id itself.
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let post_id = parse_id(&id, "Post not found")?;
    let comment_id = parse_id(&comment_id, "Comment not found")?;
    let mut post = fetch_post(&state, post_id).await?;

    let comment = post
        .find_comment(comment_id)
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    if comment.user != auth_user.user_id {
        tracing::info!(comment_id = %comment_id, user_id = %auth_user.user_id, "comment delete rejected: not author");
        return Err(ApiError::forbidden("User not authorized"));
    }

    post.remove_comment(comment_id);
    state.store.save_post(&post).await?;

    Ok(Json(post.comments))
}
