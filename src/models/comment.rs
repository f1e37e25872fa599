//! # 댓글 모델 정의

use super::{ensure_filled, id_as_string};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// 댓글 엔티티. 게시글(post_id)에 속합니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    #[serde(serialize_with = "id_as_string")]
    pub post_id: i64,
    pub nickname: String,
    pub content: String,
    #[serde(skip_serializing)]
    pub comment_password: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 댓글 생성/수정 요청. 세 필드 모두 필수이며 비어 있으면 안 됩니다.
///
/// 수정 시 `commentPassword`는 검증에 쓰이고, 같은 값이 그대로 다시 저장됩니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub nickname: String,
    pub content: String,
    pub comment_password: String,
}

impl CommentRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        ensure_filled(&[
            self.nickname.as_str(),
            self.content.as_str(),
            self.comment_password.as_str(),
        ])
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPasswordRequest {
    pub comment_password: String,
}

impl CommentPasswordRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        ensure_filled(&[self.comment_password.as_str()])
    }
}
