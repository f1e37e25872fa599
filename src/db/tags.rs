//! # 태그 데이터베이스 쿼리 모듈 (태그 리졸버)
//!
//! 게시글에 붙는 태그 문자열을 `tags` 행으로 바꾸고 `post_tags`로 연결합니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, content UNIQUE)
//! - `post_tags`: 게시글과 태그의 다대다(N:M) 관계 테이블, PRIMARY KEY (post_id, tag_id)
//!
//! ```sql
//! tags ←── post_tags ──→ posts
//!  (1)       (N:M)        (1)
//! ```
//!
//! 쓰기 함수는 `&mut SqliteConnection`을 받습니다. 호출하는 쪽에서
//! 트랜잭션(`&mut *tx`)을 넘겨 게시글 저장과 같은 단위로 묶기 위해서입니다.
//! 태그 문자열은 다듬지 않고 그대로 씁니다. "Travel"과 "travel "은 다른 태그입니다.
//! 연결이 모두 사라진 태그도 지우지 않습니다.

use crate::error::AppError;
use crate::models::Tag;
use sqlx::{SqliteConnection, SqlitePool};

/// 내용이 같은 태그를 찾고, 없으면 새로 만듭니다 (find-or-create).
///
/// `INSERT OR IGNORE`: UNIQUE 충돌이 나면 아무것도 하지 않습니다.
/// 그래서 같은 문자열로 동시에 요청이 들어와도 태그 행은 하나만 생기고,
/// 이어지는 SELECT는 항상 그 한 행을 찾습니다.
pub async fn find_or_create_tag(
    conn: &mut SqliteConnection,
    content: &str,
) -> Result<Tag, AppError> {
    sqlx::query("INSERT OR IGNORE INTO tags (content) VALUES (?)")
        .bind(content)
        .execute(&mut *conn)
        .await?;

    let tag = sqlx::query_as::<_, Tag>("SELECT id, content FROM tags WHERE content = ?")
        .bind(content)
        .fetch_one(&mut *conn)
        .await?;

    Ok(tag)
}

/// 태그 목록을 게시글에 연결합니다.
///
/// 한 요청 안에 같은 문자열이 두 번 있어도 `INSERT OR IGNORE` 덕분에 연결은 하나입니다.
pub async fn attach_tags(
    conn: &mut SqliteConnection,
    post_id: i64,
    tags: &[String],
) -> Result<(), AppError> {
    for content in tags {
        let tag = find_or_create_tag(&mut *conn, content).await?;
        sqlx::query("INSERT OR IGNORE INTO post_tags (post_id, tag_id) VALUES (?, ?)")
            .bind(post_id)
            .bind(tag.id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// 게시글의 태그 연결을 통째로 교체합니다.
///
/// 차이를 계산하지 않고 기존 연결을 모두 지운 뒤 새 목록을 다시 연결합니다.
pub async fn replace_post_tags(
    conn: &mut SqliteConnection,
    post_id: i64,
    tags: &[String],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;
    attach_tags(conn, post_id, tags).await
}

/// 게시글에 연결된 태그 문자열을 연결한 순서대로 조회합니다.
///
/// `post_tags`는 rowid 테이블이므로 `pt.rowid` 순서가 곧 연결한 순서입니다.
pub async fn post_tags(pool: &SqlitePool, post_id: i64) -> Result<Vec<String>, AppError> {
    let tags = sqlx::query_scalar::<_, String>(
        r#"
        SELECT t.content
        FROM post_tags pt
        JOIN tags t ON t.id = pt.tag_id
        WHERE pt.post_id = ?
        ORDER BY pt.rowid
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}
