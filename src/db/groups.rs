//! # 그룹 데이터베이스 쿼리 모듈
//!
//! `memory_groups` 테이블에 대한 CRUD, 목록 조회, 공감 카운터, 연쇄 삭제 쿼리입니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.

use crate::db::listing::{self, GroupSort, PageRequest};
use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// SELECT에 쓰는 컬럼 목록. `Group` 구조체의 필드와 이름이 같아야 합니다.
const GROUP_COLUMNS: &str = "id, name, group_password, image_url, introduction, is_public, \
     group_like_count, post_count, created_at, updated_at";

/// ID로 그룹 하나를 조회합니다.
///
/// - `Ok(Some(Group))`: 그룹을 찾은 경우
/// - `Ok(None)`: 해당 ID의 그룹이 없는 경우 (핸들러에서 404로 변환)
pub async fn get_group(pool: &SqlitePool, id: i64) -> Result<Option<Group>, AppError> {
    let group = sqlx::query_as::<_, Group>(&format!(
        "SELECT {GROUP_COLUMNS} FROM memory_groups WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

/// 새 그룹을 만듭니다. 공감 수와 게시글 수는 0에서 시작합니다.
pub async fn create_group(pool: &SqlitePool, req: &CreateGroupRequest) -> Result<Group, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO memory_groups
            (name, group_password, image_url, is_public, introduction, group_like_count, post_count)
        VALUES (?, ?, ?, ?, ?, 0, 0)
        "#,
    )
    .bind(&req.name)
    .bind(&req.group_password)
    .bind(&req.image_url)
    .bind(req.is_public)
    .bind(&req.introduction)
    .execute(pool)
    .await?;

    // last_insert_rowid(): 방금 INSERT한 행의 AUTOINCREMENT ID
    get_group(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created group".to_string()))
}

/// 그룹 목록을 페이지 단위로 조회합니다.
///
/// 같은 WHERE 절로 전체 개수(COUNT)와 현재 페이지 행을 각각 조회합니다.
/// - keyword: 이름 또는 소개글의 부분 문자열
/// - isPublic: "true"/"false"일 때만 공개 여부 필터
pub async fn list_groups(
    pool: &SqlitePool,
    query: &ListQuery,
) -> Result<Paginated<Group>, AppError> {
    let page = PageRequest::from_query(query.page, query.page_size)?;
    let sort = GroupSort::parse(query.sort_by.as_deref());
    let keyword = listing::keyword_filter(query.keyword.as_deref());
    let is_public = listing::visibility_filter(query.is_public.as_deref());

    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM memory_groups WHERE 1 = 1");
    push_group_filters(&mut count, keyword, is_public);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {GROUP_COLUMNS} FROM memory_groups WHERE 1 = 1"
    ));
    push_group_filters(&mut select, keyword, is_public);
    select
        .push(" ORDER BY ")
        .push(sort.order_by())
        .push(" LIMIT ")
        .push_bind(page.page_size)
        .push(" OFFSET ")
        .push_bind(page.offset());
    let groups = select.build_query_as::<Group>().fetch_all(pool).await?;

    Ok(Paginated::new(page.page, page.page_size, total, groups))
}

/// 목록/개수 쿼리에 공통 WHERE 조건을 덧붙입니다.
fn push_group_filters(qb: &mut QueryBuilder<'_, Sqlite>, keyword: Option<&str>, is_public: Option<bool>) {
    if let Some(keyword) = keyword {
        let pattern = listing::like_pattern(keyword);
        qb.push(" AND (name LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR introduction LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    if let Some(is_public) = is_public {
        qb.push(" AND is_public = ").push_bind(is_public);
    }
}

/// 그룹 정보를 수정합니다 (부분 업데이트).
///
/// `COALESCE(?, 컬럼)`: 바인딩 값이 NULL(요청에서 빠진 필드)이면 기존 값을 유지합니다.
/// 한 번의 UPDATE로 처리하므로 필드별 개별 쿼리가 필요 없습니다.
///
/// - `Ok(Some(Group))`: 수정 후 최신 상태
/// - `Ok(None)`: 그룹이 없음
pub async fn update_group(
    pool: &SqlitePool,
    id: i64,
    req: &UpdateGroupRequest,
) -> Result<Option<Group>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE memory_groups
        SET name = COALESCE(?, name),
            image_url = COALESCE(?, image_url),
            is_public = COALESCE(?, is_public),
            introduction = COALESCE(?, introduction),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(&req.name)
    .bind(&req.image_url)
    .bind(req.is_public)
    .bind(&req.introduction)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_group(pool, id).await
}

/// 그룹과 그 아래 모든 데이터를 삭제합니다.
///
/// 외래 키에 ON DELETE CASCADE가 없으므로 자식부터 순서대로 지웁니다:
/// 댓글 → 게시글-태그 연결 → 게시글 → 그룹. 태그 행 자체는 남겨둡니다.
///
/// - `true`: 삭제 성공
/// - `false`: 그룹이 없음 (먼저 지워진 경우 포함)
pub async fn delete_group(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM comments WHERE post_id IN (SELECT id FROM posts WHERE group_id = ?)")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM post_tags WHERE post_id IN (SELECT id FROM posts WHERE group_id = ?)")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM posts WHERE group_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM memory_groups WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

/// 그룹 공감 수를 1 올립니다.
///
/// `group_like_count = group_like_count + 1`은 단일 UPDATE 문이므로
/// 동시에 여러 요청이 와도 증가분이 사라지지 않습니다.
pub async fn like_group(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result =
        sqlx::query("UPDATE memory_groups SET group_like_count = group_like_count + 1 WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

/// 그룹의 공개 여부만 조회합니다.
pub async fn group_visibility(pool: &SqlitePool, id: i64) -> Result<Option<Visibility>, AppError> {
    let visibility =
        sqlx::query_as::<_, Visibility>("SELECT id, is_public FROM memory_groups WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(visibility)
}
