//! # 댓글 API 라우트 핸들러
//!
//! - `POST /api/posts/{postId}/comments`: 댓글 등록 (201)
//! - `GET /api/posts/{postId}/comments?page&pageSize`: 최신순 목록
//! - `PUT /api/comments/{commentId}`: 수정 (댓글 비밀번호)
//! - `DELETE /api/comments/{commentId}`: 삭제 (댓글 비밀번호)
//!
//! 수정/삭제 검사 순서: 본문 형식(400) → 존재(404) → 비밀번호(401)

use crate::{
    db::{self, listing::PageRequest},
    error::AppError,
    extract::{AppJson, AppPath, AppQuery},
    models::*,
    routes::AppState,
    services::access::{self, Resource},
};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

async fn ensure_post_exists(state: &AppState, post_id: i64) -> Result<(), AppError> {
    match db::get_post(&state.pool, post_id).await? {
        Some(_) => Ok(()),
        None => Err(Resource::Post.not_found()),
    }
}

async fn find_comment(state: &AppState, id: i64) -> Result<Comment, AppError> {
    db::get_comment(&state.pool, id)
        .await?
        .ok_or_else(|| Resource::Comment.not_found())
}

pub async fn create_comment(
    State(state): State<AppState>,
    AppPath(post_id): AppPath<i64>,
    AppJson(req): AppJson<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    req.validate()?;
    ensure_post_exists(&state, post_id).await?;

    let comment = db::create_comment(&state.pool, post_id, &req).await?;
    tracing::info!(post_id, comment_id = comment.id, "Comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list_comments(
    State(state): State<AppState>,
    AppPath(post_id): AppPath<i64>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Paginated<Comment>>, AppError> {
    let page = PageRequest::from_query(query.page, query.page_size)?;
    ensure_post_exists(&state, post_id).await?;

    let comments = db::list_comments(&state.pool, post_id, page).await?;
    Ok(Json(comments))
}

/// 닉네임, 내용, 비밀번호를 모두 받아 그대로 덮어씁니다.
pub async fn update_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<CommentRequest>,
) -> Result<Json<Comment>, AppError> {
    req.validate()?;
    let comment = find_comment(&state, id).await?;
    access::verify_secret(
        &comment.comment_password,
        &req.comment_password,
        Resource::Comment,
        id,
    )?;

    let updated = db::update_comment(&state.pool, id, &req)
        .await?
        .ok_or_else(|| Resource::Comment.not_found())?;
    Ok(Json(updated))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<CommentPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    req.validate()?;
    let comment = find_comment(&state, id).await?;
    access::verify_secret(
        &comment.comment_password,
        &req.comment_password,
        Resource::Comment,
        id,
    )?;

    if !db::delete_comment(&state.pool, id).await? {
        return Err(Resource::Comment.not_found());
    }
    Ok(Json(json!({ "message": "댓글 삭제 성공" })))
}
