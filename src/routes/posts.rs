//! # 게시글 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 게이트 |
//! |--------|------|--------|--------|
//! | POST | /api/groups/{groupId}/posts | `create_post` | 그룹 비밀번호 |
//! | GET | /api/groups/{groupId}/posts | `list_posts` | 없음 |
//! | GET | /api/posts/{postId} | `get_post` | 공개 게시글만 |
//! | PUT | /api/posts/{postId} | `update_post` | 게시글 비밀번호 |
//! | DELETE | /api/posts/{postId} | `delete_post` | 게시글 비밀번호 |
//! | POST | /api/posts/{postId}/private | `read_private_post` | 게시글 비밀번호 |
//! | POST | /api/posts/{postId}/like | `like_post` | 공개 게시글만 |
//! | POST | /api/posts/{postId}/like/private | `like_private_post` | 게시글 비밀번호 |
//! | GET | /api/posts/{postId}/is-public | `post_is_public` | 없음 |
//!
//! 게시글 응답에는 항상 태그 문자열 목록(`tags`)이 함께 들어갑니다.

use crate::{
    db,
    error::AppError,
    extract::{AppJson, AppPath, AppQuery},
    models::*,
    routes::AppState,
    services::access::{self, Resource},
};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

async fn find_post(state: &AppState, id: i64) -> Result<Post, AppError> {
    db::get_post(&state.pool, id)
        .await?
        .ok_or_else(|| Resource::Post.not_found())
}

/// `POST /api/groups/{groupId}/posts`
///
/// 그룹이 없으면 404, 그룹 비밀번호가 틀리면 401이며 이때 게시글은 만들어지지 않습니다.
pub async fn create_post(
    State(state): State<AppState>,
    AppPath(group_id): AppPath<i64>,
    AppJson(req): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    req.validate()?;
    let group = db::get_group(&state.pool, group_id)
        .await?
        .ok_or_else(|| Resource::Group.not_found())?;
    access::verify_secret(
        &group.group_password,
        &req.group_password,
        Resource::Group,
        group_id,
    )?;

    let post = db::create_post(&state.pool, group_id, &req).await?;
    tracing::info!(group_id, post_id = post.post.id, tags = post.tags.len(), "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /api/groups/{groupId}/posts?page&pageSize&sortBy&keyword&isPublic`
pub async fn list_posts(
    State(state): State<AppState>,
    AppPath(group_id): AppPath<i64>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Paginated<PostResponse>>, AppError> {
    if db::get_group(&state.pool, group_id).await?.is_none() {
        return Err(Resource::Group.not_found());
    }
    let page = db::list_posts(&state.pool, group_id, &query).await?;
    Ok(Json(page))
}

/// `GET /api/posts/{postId}`: 비공개 게시글은 403
pub async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<PostResponse>, AppError> {
    let post = find_post(&state, id).await?;
    access::ensure_public(&post)?;
    Ok(Json(db::with_tags(&state.pool, post).await?))
}

/// `PUT /api/posts/{postId}` + `{ postPassword, ...바꿀 필드 }`
///
/// `tags`를 보내면 태그 목록 전체를 교체하고, 빼면 기존 태그를 유지합니다.
pub async fn update_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    req.validate()?;
    let post = find_post(&state, id).await?;
    access::verify_secret(&post.post_password, &req.post_password, Resource::Post, id)?;

    if !db::update_post(&state.pool, id, &req).await? {
        return Err(Resource::Post.not_found());
    }
    let updated = db::get_post_response(&state.pool, id)
        .await?
        .ok_or_else(|| Resource::Post.not_found())?;
    Ok(Json(updated))
}

/// `DELETE /api/posts/{postId}` + `{ postPassword }`
///
/// 댓글과 태그 연결을 먼저 지우고, 그룹의 게시글 수를 1 내립니다.
pub async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<PostPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    ensure_filled(&[req.post_password.as_str()])?;
    let post = find_post(&state, id).await?;
    access::verify_secret(&post.post_password, &req.post_password, Resource::Post, id)?;

    if !db::delete_post(&state.pool, id).await? {
        return Err(Resource::Post.not_found());
    }
    tracing::info!(post_id = id, group_id = post.group_id, "Post deleted");
    Ok(Json(json!({ "message": "게시글 삭제 성공" })))
}

/// `POST /api/posts/{postId}/private` + `{ postPassword }`
pub async fn read_private_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<PostPasswordRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let post = find_post(&state, id).await?;
    access::verify_secret(&post.post_password, &req.post_password, Resource::Post, id)?;
    Ok(Json(db::with_tags(&state.pool, post).await?))
}

/// `POST /api/posts/{postId}/like`: 공개 게시글에만 공감할 수 있습니다.
pub async fn like_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let post = find_post(&state, id).await?;
    access::ensure_public(&post)?;
    increment_like(&state, id).await
}

/// `POST /api/posts/{postId}/like/private` + `{ postPassword }`
pub async fn like_private_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<PostPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let post = find_post(&state, id).await?;
    access::verify_secret(&post.post_password, &req.post_password, Resource::Post, id)?;
    increment_like(&state, id).await
}

async fn increment_like(state: &AppState, id: i64) -> Result<Json<Value>, AppError> {
    if !db::like_post(&state.pool, id).await? {
        return Err(Resource::Post.not_found());
    }
    Ok(Json(json!({ "message": "게시글에 공감했습니다." })))
}

/// `GET /api/posts/{postId}/is-public` → `{ id, isPublic }`
pub async fn post_is_public(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Visibility>, AppError> {
    let visibility = db::post_visibility(&state.pool, id)
        .await?
        .ok_or_else(|| Resource::Post.not_found())?;
    Ok(Json(visibility))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::TestApp;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    async fn group_post_count(app: &TestApp, group_id: &str) -> i64 {
        let (_, body) = app
            .request(Method::GET, &format!("/api/groups/{group_id}"), None)
            .await;
        body["postCount"].as_i64().unwrap()
    }

    fn post_body(group_password: &str) -> Value {
        json!({
            "nickname": "n",
            "title": "제목",
            "content": "내용",
            "postPassword": "ppw",
            "groupPassword": group_password,
            "tags": ["여행"],
            "moment": "2024-05-01T09:00:00+09:00",
            "isPublic": true,
        })
    }

    #[tokio::test]
    async fn create_increments_post_count_and_returns_tags() {
        let app = TestApp::new().await;
        let group_id = app.create_group("g", true).await;

        let (status, body) = app
            .request(
                Method::POST,
                &format!("/api/groups/{group_id}/posts"),
                Some(post_body("gpw")),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["groupId"], group_id.as_str());
        assert_eq!(body["tags"], json!(["여행"]));
        assert_eq!(body["moment"], "2024-05-01T00:00:00.000Z");
        assert_eq!(body["likeCount"], 0);
        assert!(body.get("postPassword").is_none());
        assert_eq!(group_post_count(&app, &group_id).await, 1);
    }

    #[tokio::test]
    async fn wrong_group_password_creates_nothing() {
        let app = TestApp::new().await;
        let group_id = app.create_group("g", true).await;

        let (status, body) = app
            .request(
                Method::POST,
                &format!("/api/groups/{group_id}/posts"),
                Some(post_body("wrong")),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "비밀번호가 틀렸습니다.");
        assert_eq!(group_post_count(&app, &group_id).await, 0);

        let (_, list) = app
            .request(Method::GET, &format!("/api/groups/{group_id}/posts"), None)
            .await;
        assert_eq!(list["totalItemCount"], 0);
    }

    #[tokio::test]
    async fn create_in_missing_group_is_not_found() {
        let app = TestApp::new().await;
        let (status, _) = app
            .request(Method::POST, "/api/groups/42/posts", Some(post_body("gpw")))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_moment_is_bad_request() {
        let app = TestApp::new().await;
        let group_id = app.create_group("g", true).await;
        let mut body = post_body("gpw");
        body["moment"] = json!("어제");

        let (status, _) = app
            .request(Method::POST, &format!("/api/groups/{group_id}/posts"), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_decrements_post_count() {
        let app = TestApp::new().await;
        let group_id = app.create_group("g", true).await;
        let post = app.create_post(&group_id, "하나", &["a"]).await;
        app.create_post(&group_id, "둘", &[]).await;
        assert_eq!(group_post_count(&app, &group_id).await, 2);

        let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());
        let (status, _) = app
            .request(Method::DELETE, &uri, Some(json!({ "postPassword": "nope" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = app
            .request(Method::DELETE, &uri, Some(json!({ "postPassword": "ppw" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "게시글 삭제 성공");
        assert_eq!(group_post_count(&app, &group_id).await, 1);

        let (status, _) = app.request(Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn posts_sharing_a_tag_reuse_one_tag_row() {
        let app = TestApp::new().await;
        let group_id = app.create_group("g", true).await;
        app.create_post(&group_id, "바다1", &["바다"]).await;
        app.create_post(&group_id, "바다2", &["바다", "가족"]).await;

        let tag_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE content = '바다'")
            .fetch_one(&app.state.pool)
            .await
            .unwrap();
        assert_eq!(tag_rows, 1);

        let (_, list) = app
            .request(
                Method::GET,
                &format!("/api/groups/{group_id}/posts?keyword=%EB%B0%94%EB%8B%A4"),
                None,
            )
            .await;
        assert_eq!(list["totalItemCount"], 2);
    }

    #[tokio::test]
    async fn update_replaces_tags_only_when_sent() {
        let app = TestApp::new().await;
        let group_id = app.create_group("g", true).await;
        let post = app.create_post(&group_id, "원래", &["a", "b"]).await;
        let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());

        let (status, body) = app
            .request(
                Method::PUT,
                &uri,
                Some(json!({ "postPassword": "ppw", "title": "바뀜" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "바뀜");
        assert_eq!(body["tags"], json!(["a", "b"]));

        let (_, body) = app
            .request(
                Method::PUT,
                &uri,
                Some(json!({ "postPassword": "ppw", "tags": ["c"] })),
            )
            .await;
        assert_eq!(body["tags"], json!(["c"]));
        assert_eq!(body["title"], "바뀜");

        let (status, _) = app
            .request(Method::PUT, &uri, Some(json!({ "postPassword": "x", "title": "y" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn private_post_gates() {
        let app = TestApp::new().await;
        let group_id = app.create_group("g", true).await;
        let mut body = post_body("gpw");
        body["isPublic"] = json!(false);
        let (_, post) = app
            .request(Method::POST, &format!("/api/groups/{group_id}/posts"), Some(body))
            .await;
        let id = post["id"].as_str().unwrap();

        let (status, body) = app.request(Method::GET, &format!("/api/posts/{id}"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "비공개 게시글입니다!");

        let (status, _) = app
            .request(Method::POST, &format!("/api/posts/{id}/like"), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .request(
                Method::POST,
                &format!("/api/posts/{id}/like/private"),
                Some(json!({ "postPassword": "ppw" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app
            .request(
                Method::POST,
                &format!("/api/posts/{id}/private"),
                Some(json!({ "postPassword": "ppw" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likeCount"], 1);
        assert_eq!(body["tags"], json!(["여행"]));

        let (_, body) = app
            .request(Method::GET, &format!("/api/posts/{id}/is-public"), None)
            .await;
        assert_eq!(body, json!({ "id": id, "isPublic": false }));
    }

    #[tokio::test]
    async fn public_like_increments() {
        let app = TestApp::new().await;
        let group_id = app.create_group("g", true).await;
        let post = app.create_post(&group_id, "좋아요", &[]).await;
        let id = post["id"].as_str().unwrap();

        let (status, body) = app
            .request(Method::POST, &format!("/api/posts/{id}/like"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "게시글에 공감했습니다.");

        let (_, body) = app.request(Method::GET, &format!("/api/posts/{id}"), None).await;
        assert_eq!(body["likeCount"], 1);
    }

    #[tokio::test]
    async fn list_in_missing_group_is_not_found() {
        let app = TestApp::new().await;
        let (status, _) = app.request(Method::GET, "/api/groups/7/posts", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
