//! # 그룹 모델 정의
//!
//! ## 구조체 역할
//! - `Group`: DB의 `memory_groups` 한 행 (응답용)
//! - `CreateGroupRequest`: `POST /api/groups` 본문
//! - `UpdateGroupRequest`: `PUT /api/groups/:groupId` 본문
//! - `GroupPasswordRequest`: 삭제, 비공개 조회에 쓰는 비밀번호만 담은 본문

use super::{ensure_filled, id_as_string};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// 그룹 엔티티
///
/// `post_count`, `group_like_count`는 게시글 생성/삭제와 공감하기에서
/// 직접 증감시키는 비정규화 카운터입니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub name: String,
    /// 평문 비밀번호. 응답에는 절대 포함하지 않습니다.
    #[serde(skip_serializing)]
    pub group_password: String,
    pub image_url: Option<String>,
    pub introduction: Option<String>,
    pub is_public: bool,
    pub group_like_count: i64,
    pub post_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// 그룹 생성 요청
///
/// `isPublic`이 빠지면 false(비공개)로 만듭니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    pub group_password: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    pub introduction: Option<String>,
}

impl CreateGroupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        ensure_filled(&[self.name.as_str(), self.group_password.as_str()])
    }
}

/// 그룹 수정 요청
///
/// `groupPassword`는 검증용이며 필수입니다. 나머지 필드는 보낸 것만 바뀝니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    pub group_password: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub is_public: Option<bool>,
    pub introduction: Option<String>,
}

impl UpdateGroupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        ensure_filled(&[self.group_password.as_str()])?;
        // 이름을 보냈다면 빈 문자열이어서는 안 됩니다.
        if let Some(name) = &self.name {
            ensure_filled(&[name.as_str()])?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPasswordRequest {
    pub group_password: String,
}
