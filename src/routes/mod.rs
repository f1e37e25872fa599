//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 조립 함수를 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `groups`: 그룹 CRUD, 비공개 조회, 공감, 공개 여부
//! - `posts`: 게시글 CRUD, 비공개 조회, 공감, 공개 여부
//! - `comments`: 댓글 CRUD
//! - `image`: 이미지 업로드 (multipart)
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod comments;
pub mod groups;
pub mod health;
pub mod image;
pub mod posts;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// 모든 핸들러가 공유하는 애플리케이션 상태
///
/// `SqlitePool`은 내부적으로 Arc이므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// 업로드 이미지 저장 디렉토리
    pub uploads_path: PathBuf,
    /// `POST /api/image` 본문 크기 제한 (바이트)
    pub upload_max_bytes: usize,
}

/// 전체 라우터를 조립합니다.
///
/// - `/api/...`: JSON API
/// - `/uploads/...`: 업로드된 이미지 정적 서빙
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        // 그룹
        .route("/groups", post(groups::create_group).get(groups::list_groups))
        .route(
            "/groups/{group_id}",
            get(groups::get_group)
                .put(groups::update_group)
                .delete(groups::delete_group),
        )
        .route("/groups/{group_id}/private", post(groups::read_private_group))
        .route("/groups/{group_id}/like", post(groups::like_group))
        .route("/groups/{group_id}/is-public", get(groups::group_is_public))
        // 게시글
        .route(
            "/groups/{group_id}/posts",
            post(posts::create_post).get(posts::list_posts),
        )
        .route(
            "/posts/{post_id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/{post_id}/private", post(posts::read_private_post))
        .route("/posts/{post_id}/like", post(posts::like_post))
        .route("/posts/{post_id}/like/private", post(posts::like_private_post))
        .route("/posts/{post_id}/is-public", get(posts::post_is_public))
        // 댓글
        .route(
            "/posts/{post_id}/comments",
            post(comments::create_comment).get(comments::list_comments),
        )
        .route(
            "/comments/{comment_id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        // 이미지 업로드: 이 경로만 기본 본문 제한(2MB) 대신 설정 값을 씁니다.
        .route(
            "/image",
            post(image::upload_image).layer(DefaultBodyLimit::max(state.upload_max_bytes)),
        )
        .route("/health", get(health::health_check));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(&state.uploads_path))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
