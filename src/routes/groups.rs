//! # 그룹 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/groups | `create_group` | 그룹 등록 (201) |
//! | GET | /api/groups | `list_groups` | 그룹 목록 (페이지/정렬/검색) |
//! | GET | /api/groups/{groupId} | `get_group` | 공개 그룹 상세 |
//! | PUT | /api/groups/{groupId} | `update_group` | 그룹 수정 (그룹 비밀번호) |
//! | DELETE | /api/groups/{groupId} | `delete_group` | 그룹 삭제 (그룹 비밀번호) |
//! | POST | /api/groups/{groupId}/private | `read_private_group` | 비밀번호로 상세 조회 |
//! | POST | /api/groups/{groupId}/like | `like_group` | 공감 +1 |
//! | GET | /api/groups/{groupId}/is-public | `group_is_public` | 공개 여부 |
//!
//! 비밀번호가 필요한 핸들러는 항상 "존재 확인(404) → 비밀번호 비교(401)" 순서입니다.

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

/// 그룹을 찾고, 없으면 404를 반환합니다.
async fn find_group(state: &AppState, id: i64) -> Result<Group, AppError> {
    db::get_group(&state.pool, id)
        .await?
        .ok_or_else(|| Resource::Group.not_found())
}

/// `POST /api/groups` → `201 Created` + 그룹
pub async fn create_group(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), AppError> {
    req.validate()?;
    let group = db::create_group(&state.pool, &req).await?;
    tracing::info!(group_id = group.id, "Group created");
    Ok((StatusCode::CREATED, Json(group)))
}

/// `GET /api/groups?page&pageSize&sortBy&keyword&isPublic`
pub async fn list_groups(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Paginated<Group>>, AppError> {
    let page = db::list_groups(&state.pool, &query).await?;
    Ok(Json(page))
}

/// `GET /api/groups/{groupId}`
///
/// 비공개 그룹은 403입니다. 비공개 그룹 상세는 `/private`로 비밀번호와 함께 요청합니다.
pub async fn get_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Group>, AppError> {
    let group = find_group(&state, id).await?;
    access::ensure_public(&group)?;
    Ok(Json(group))
}

/// `PUT /api/groups/{groupId}` + `{ groupPassword, name?, imageUrl?, isPublic?, introduction? }`
///
/// 요청에 없는 필드는 기존 값을 유지합니다.
pub async fn update_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateGroupRequest>,
) -> Result<Json<Group>, AppError> {
    req.validate()?;
    let group = find_group(&state, id).await?;
    access::verify_secret(&group.group_password, &req.group_password, Resource::Group, id)?;

    let updated = db::update_group(&state.pool, id, &req)
        .await?
        // 확인과 수정 사이에 삭제된 경우
        .ok_or_else(|| Resource::Group.not_found())?;
    Ok(Json(updated))
}

/// `DELETE /api/groups/{groupId}` + `{ groupPassword }`
///
/// 그룹에 속한 게시글, 태그 연결, 댓글까지 함께 지웁니다.
pub async fn delete_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<GroupPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    ensure_filled(&[req.group_password.as_str()])?;
    let group = find_group(&state, id).await?;
    access::verify_secret(&group.group_password, &req.group_password, Resource::Group, id)?;

    if !db::delete_group(&state.pool, id).await? {
        return Err(Resource::Group.not_found());
    }
    tracing::info!(group_id = id, "Group deleted");
    Ok(Json(json!({ "message": "그룹 삭제 성공" })))
}

/// `POST /api/groups/{groupId}/private` + `{ groupPassword }`
///
/// 공개 여부와 관계없이 비밀번호가 맞으면 그룹 상세를 돌려줍니다.
pub async fn read_private_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<GroupPasswordRequest>,
) -> Result<Json<Group>, AppError> {
    let group = find_group(&state, id).await?;
    access::verify_secret(&group.group_password, &req.group_password, Resource::Group, id)?;
    Ok(Json(group))
}

/// `POST /api/groups/{groupId}/like`
pub async fn like_group(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    if !db::like_group(&state.pool, id).await? {
        return Err(Resource::Group.not_found());
    }
    Ok(Json(json!({ "message": "그룹에 공감했습니다." })))
}

/// `GET /api/groups/{groupId}/is-public` → `{ id, isPublic }`
pub async fn group_is_public(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Visibility>, AppError> {
    let visibility = db::group_visibility(&state.pool, id)
        .await?
        .ok_or_else(|| Resource::Group.not_found())?;
    Ok(Json(visibility))
}
