//! # 댓글 데이터베이스 쿼리 모듈
//!
//! 댓글 생성/삭제는 게시글의 `comment_count`와 함께 하나의 트랜잭션으로 처리합니다.

use crate::db::listing::PageRequest;
use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

const COMMENT_COLUMNS: &str =
    "id, post_id, nickname, content, comment_password, created_at, updated_at";

pub async fn get_comment(pool: &SqlitePool, id: i64) -> Result<Option<Comment>, AppError> {
    let comment = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// 게시글에 댓글을 달고 게시글의 댓글 수를 1 올립니다.
///
/// 게시글 존재 여부는 핸들러가 먼저 확인합니다.
pub async fn create_comment(
    pool: &SqlitePool,
    post_id: i64,
    req: &CommentRequest,
) -> Result<Comment, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO comments (post_id, nickname, content, comment_password) VALUES (?, ?, ?, ?)",
    )
    .bind(post_id)
    .bind(&req.nickname)
    .bind(&req.content)
    .bind(&req.comment_password)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE posts SET comment_count = comment_count + 1 WHERE id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    get_comment(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created comment".to_string()))
}

/// 게시글의 댓글 목록을 최신순으로 조회합니다.
pub async fn list_comments(
    pool: &SqlitePool,
    post_id: i64,
    page: PageRequest,
) -> Result<Paginated<Comment>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    let comments = sqlx::query_as::<_, Comment>(&format!(
        r#"
        SELECT {COMMENT_COLUMNS}
        FROM comments
        WHERE post_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ? OFFSET ?
        "#
    ))
    .bind(post_id)
    .bind(page.page_size)
    .bind(page.offset())
    .fetch_all(pool)
    .await?;

    Ok(Paginated::new(page.page, page.page_size, total, comments))
}

/// 댓글의 닉네임, 내용, 비밀번호를 요청 값으로 덮어씁니다.
///
/// - `Ok(Some(Comment))`: 수정 후 최신 상태
/// - `Ok(None)`: 댓글이 없음
pub async fn update_comment(
    pool: &SqlitePool,
    id: i64,
    req: &CommentRequest,
) -> Result<Option<Comment>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET nickname = ?, content = ?, comment_password = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(&req.nickname)
    .bind(&req.content)
    .bind(&req.comment_password)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_comment(pool, id).await
}

/// 댓글을 삭제하고 게시글의 댓글 수를 1 내립니다 (0 아래로 내려가지 않음).
pub async fn delete_comment(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    let post_id: Option<i64> = sqlx::query_scalar("SELECT post_id FROM comments WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(post_id) = post_id else {
        return Ok(false);
    };

    sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE posts SET comment_count = MAX(comment_count - 1, 0) WHERE id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}
