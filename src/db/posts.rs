//! # 게시글 데이터베이스 쿼리 모듈
//!
//! `posts` 테이블 CRUD와 태그 연결, 그룹의 `post_count` 갱신을 담당합니다.
//!
//! 게시글 생성/삭제는 그룹 카운터까지 하나의 트랜잭션으로 묶습니다.
//! 태그 쓰기는 `db::tags`의 함수에 같은 트랜잭션 연결을 넘겨서 처리합니다.

use crate::db::listing::{self, PageRequest, PostSort};
use crate::db::tags;
use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const POST_COLUMNS: &str = "id, group_id, nickname, title, content, post_password, image_url, \
     location, moment, is_public, like_count, comment_count, created_at, updated_at";

/// ID로 게시글 행 하나를 조회합니다 (태그 제외).
pub async fn get_post(pool: &SqlitePool, id: i64) -> Result<Option<Post>, AppError> {
    let post = sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// 게시글 행에 태그 목록을 붙여 응답 형태로 만듭니다.
pub async fn with_tags(pool: &SqlitePool, post: Post) -> Result<PostResponse, AppError> {
    let tags = tags::post_tags(pool, post.id).await?;
    Ok(PostResponse { post, tags })
}

/// ID로 게시글을 태그와 함께 조회합니다.
pub async fn get_post_response(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<PostResponse>, AppError> {
    match get_post(pool, id).await? {
        Some(post) => Ok(Some(with_tags(pool, post).await?)),
        None => Ok(None),
    }
}

/// 그룹에 새 게시글을 만듭니다.
///
/// ## 처리 흐름 (하나의 트랜잭션)
/// 1. posts에 INSERT (공감 수, 댓글 수는 0)
/// 2. 태그 find-or-create 후 post_tags 연결
/// 3. 그룹의 post_count + 1
///
/// 그룹 존재 여부와 그룹 비밀번호 검증은 호출하는 핸들러가 먼저 합니다.
pub async fn create_post(
    pool: &SqlitePool,
    group_id: i64,
    req: &CreatePostRequest,
) -> Result<PostResponse, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO posts
            (group_id, nickname, title, content, post_password, image_url,
             location, moment, is_public, like_count, comment_count)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0)
        "#,
    )
    .bind(group_id)
    .bind(&req.nickname)
    .bind(&req.title)
    .bind(&req.content)
    .bind(&req.post_password)
    .bind(&req.image_url)
    .bind(&req.location)
    .bind(moment_to_db(req.moment.as_ref()))
    .bind(req.is_public)
    .execute(&mut *tx)
    .await?;
    let post_id = result.last_insert_rowid();

    tags::attach_tags(&mut *tx, post_id, &req.tags).await?;

    sqlx::query("UPDATE memory_groups SET post_count = post_count + 1 WHERE id = ?")
        .bind(group_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    get_post_response(pool, post_id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created post".to_string()))
}

/// 그룹의 게시글 목록을 페이지 단위로 조회합니다.
///
/// - keyword: 제목이나 본문의 부분 문자열, 또는 태그와 정확히 일치
/// - isPublic: "true"/"false"일 때만 공개 여부 필터
/// - sortBy: latest | mostCommented | mostLiked
pub async fn list_posts(
    pool: &SqlitePool,
    group_id: i64,
    query: &ListQuery,
) -> Result<Paginated<PostResponse>, AppError> {
    let page = PageRequest::from_query(query.page, query.page_size)?;
    let sort = PostSort::parse(query.sort_by.as_deref());
    let keyword = listing::keyword_filter(query.keyword.as_deref());
    let is_public = listing::visibility_filter(query.is_public.as_deref());

    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM posts WHERE group_id = ");
    count.push_bind(group_id);
    push_post_filters(&mut count, keyword, is_public);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE group_id = "
    ));
    select.push_bind(group_id);
    push_post_filters(&mut select, keyword, is_public);
    select
        .push(" ORDER BY ")
        .push(sort.order_by())
        .push(" LIMIT ")
        .push_bind(page.page_size)
        .push(" OFFSET ")
        .push_bind(page.offset());
    let posts = select.build_query_as::<Post>().fetch_all(pool).await?;

    // 페이지 크기만큼 태그 조회가 한 번씩 더 나갑니다.
    let mut data = Vec::with_capacity(posts.len());
    for post in posts {
        data.push(with_tags(pool, post).await?);
    }

    Ok(Paginated::new(page.page, page.page_size, total, data))
}

fn push_post_filters(qb: &mut QueryBuilder<'_, Sqlite>, keyword: Option<&str>, is_public: Option<bool>) {
    if let Some(keyword) = keyword {
        let pattern = listing::like_pattern(keyword);
        qb.push(" AND (title LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR content LIKE ")
            .push_bind(pattern)
            .push(
                " ESCAPE '\\' OR EXISTS (SELECT 1 FROM post_tags pt JOIN tags t ON t.id = pt.tag_id \
                 WHERE pt.post_id = posts.id AND t.content = ",
            )
            .push_bind(keyword.to_string())
            .push("))");
    }
    if let Some(is_public) = is_public {
        qb.push(" AND is_public = ").push_bind(is_public);
    }
}

/// 게시글을 수정합니다 (부분 업데이트).
///
/// `tags`가 요청에 있으면 트랜잭션 안에서 태그 연결을 통째로 교체합니다.
///
/// - `Ok(true)`: 수정 성공
/// - `Ok(false)`: 게시글이 없음
pub async fn update_post(
    pool: &SqlitePool,
    id: i64,
    req: &UpdatePostRequest,
) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE posts
        SET nickname = COALESCE(?, nickname),
            title = COALESCE(?, title),
            content = COALESCE(?, content),
            image_url = COALESCE(?, image_url),
            location = COALESCE(?, location),
            moment = COALESCE(?, moment),
            is_public = COALESCE(?, is_public),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(&req.nickname)
    .bind(&req.title)
    .bind(&req.content)
    .bind(&req.image_url)
    .bind(&req.location)
    .bind(moment_to_db(req.moment.as_ref()))
    .bind(req.is_public)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        // tx는 commit 없이 drop되어 롤백됩니다.
        return Ok(false);
    }

    if let Some(new_tags) = &req.tags {
        tags::replace_post_tags(&mut *tx, id, new_tags).await?;
    }

    tx.commit().await?;
    Ok(true)
}

/// 게시글을 삭제합니다.
///
/// ## 처리 순서 (하나의 트랜잭션)
/// 1. 게시글의 group_id 확인 (없으면 false)
/// 2. 댓글 삭제
/// 3. post_tags 연결 삭제 (태그 행은 남김)
/// 4. 게시글 삭제
/// 5. 그룹의 post_count - 1 (0 아래로 내려가지 않음)
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    let group_id: Option<i64> = sqlx::query_scalar("SELECT group_id FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    // let-else: 패턴이 맞지 않으면 else 블록에서 반드시 빠져나가야 합니다.
    let Some(group_id) = group_id else {
        return Ok(false);
    };

    sqlx::query("DELETE FROM comments WHERE post_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Ok(false);
    }
    sqlx::query("UPDATE memory_groups SET post_count = MAX(post_count - 1, 0) WHERE id = ?")
        .bind(group_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

/// 게시글 공감 수를 1 올립니다.
pub async fn like_post(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE posts SET like_count = like_count + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 게시글의 공개 여부만 조회합니다.
pub async fn post_visibility(pool: &SqlitePool, id: i64) -> Result<Option<Visibility>, AppError> {
    let visibility = sqlx::query_as::<_, Visibility>("SELECT id, is_public FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(visibility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::groups;
    use crate::db::test_support::memory_pool;

    async fn new_group(pool: &SqlitePool) -> Group {
        let req = CreateGroupRequest {
            name: "가족".to_string(),
            group_password: "gpw".to_string(),
            image_url: None,
            is_public: true,
            introduction: None,
        };
        groups::create_group(pool, &req).await.unwrap()
    }

    fn new_post(title: &str, tags: &[&str]) -> CreatePostRequest {
        CreatePostRequest {
            nickname: "닉".to_string(),
            title: title.to_string(),
            content: format!("{title} 본문"),
            post_password: "ppw".to_string(),
            group_password: "gpw".to_string(),
            image_url: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            location: Some("부산".to_string()),
            moment: None,
            is_public: true,
        }
    }

    async fn count(pool: &SqlitePool, sql: &str) -> i64 {
        sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
    }

    #[tokio::test]
    async fn create_links_tags_and_bumps_group_counter() {
        let pool = memory_pool().await;
        let group = new_group(&pool).await;

        let post = create_post(&pool, group.id, &new_post("바다", &["여름", "바다"]))
            .await
            .unwrap();
        assert_eq!(post.tags, vec!["여름", "바다"]);
        assert_eq!(post.post.like_count, 0);
        assert_eq!(post.post.comment_count, 0);

        let group = groups::get_group(&pool, group.id).await.unwrap().unwrap();
        assert_eq!(group.post_count, 1);
    }

    #[tokio::test]
    async fn posts_are_private_unless_marked_public() {
        let pool = memory_pool().await;
        let group = new_group(&pool).await;

        // is_public 컬럼을 생략한 INSERT는 스키마 기본값(비공개)을 씁니다.
        let id = sqlx::query(
            "INSERT INTO posts (group_id, nickname, title, content, post_password) VALUES (?, 'n', 't', 'c', 'p')",
        )
        .bind(group.id)
        .execute(&pool)
        .await
        .unwrap()
        .last_insert_rowid();
        assert!(!get_post(&pool, id).await.unwrap().unwrap().is_public);

        let body = serde_json::json!({
            "nickname": "n", "title": "t", "content": "c",
            "postPassword": "p", "groupPassword": "gpw"
        });
        let req: CreatePostRequest = serde_json::from_value(body).unwrap();
        let post = create_post(&pool, group.id, &req).await.unwrap();
        assert!(!post.post.is_public);
    }

    #[tokio::test]
    async fn same_tag_on_two_posts_shares_one_row() {
        let pool = memory_pool().await;
        let group = new_group(&pool).await;
        create_post(&pool, group.id, &new_post("a", &["여행"])).await.unwrap();
        create_post(&pool, group.id, &new_post("b", &["여행"])).await.unwrap();

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM tags").await, 1);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM post_tags").await, 2);
    }

    #[tokio::test]
    async fn delete_cascades_and_decrements_group() {
        let pool = memory_pool().await;
        let group = new_group(&pool).await;
        let keep = create_post(&pool, group.id, &new_post("keep", &["x"])).await.unwrap();
        let gone = create_post(&pool, group.id, &new_post("gone", &["x", "y"])).await.unwrap();
        sqlx::query("INSERT INTO comments (post_id, nickname, content, comment_password) VALUES (?, 'n', 'c', 'p')")
            .bind(gone.post.id)
            .execute(&pool)
            .await
            .unwrap();

        assert!(delete_post(&pool, gone.post.id).await.unwrap());

        let group = groups::get_group(&pool, group.id).await.unwrap().unwrap();
        assert_eq!(group.post_count, 1);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM comments").await, 0);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM post_tags").await, 1);
        assert!(get_post(&pool, gone.post.id).await.unwrap().is_none());
        assert!(get_post(&pool, keep.post.id).await.unwrap().is_some());

        // 두 번째 삭제는 없는 게시글로 보고합니다.
        assert!(!delete_post(&pool, gone.post.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_replaces_tags_only_when_given() {
        let pool = memory_pool().await;
        let group = new_group(&pool).await;
        let post = create_post(&pool, group.id, &new_post("t", &["a", "b"])).await.unwrap();

        let mut req = UpdatePostRequest {
            post_password: "ppw".to_string(),
            nickname: None,
            title: Some("새 제목".to_string()),
            content: None,
            image_url: None,
            tags: None,
            location: None,
            moment: None,
            is_public: None,
        };
        assert!(update_post(&pool, post.post.id, &req).await.unwrap());
        let updated = get_post_response(&pool, post.post.id).await.unwrap().unwrap();
        assert_eq!(updated.post.title, "새 제목");
        assert_eq!(updated.post.location.as_deref(), Some("부산"));
        assert_eq!(updated.tags, vec!["a", "b"]);

        req.tags = Some(vec!["c".to_string()]);
        update_post(&pool, post.post.id, &req).await.unwrap();
        let updated = get_post_response(&pool, post.post.id).await.unwrap().unwrap();
        assert_eq!(updated.tags, vec!["c"]);

        assert!(!update_post(&pool, 999, &req).await.unwrap());
    }

    #[tokio::test]
    async fn list_matches_keyword_in_tags_and_sorts_by_likes() {
        let pool = memory_pool().await;
        let group = new_group(&pool).await;
        let a = create_post(&pool, group.id, &new_post("산책", &["강아지"])).await.unwrap();
        let b = create_post(&pool, group.id, &new_post("강아지 사진", &[])).await.unwrap();
        create_post(&pool, group.id, &new_post("요리", &[])).await.unwrap();
        like_post(&pool, a.post.id).await.unwrap();

        let query = ListQuery {
            keyword: Some("강아지".to_string()),
            sort_by: Some("mostLiked".to_string()),
            ..Default::default()
        };
        let page = list_posts(&pool, group.id, &query).await.unwrap();
        assert_eq!(page.total_item_count, 2);
        assert_eq!(page.data[0].post.id, a.post.id);
        assert_eq!(page.data[1].post.id, b.post.id);
    }
}
