//! # 게시글(추억) 모델 정의
//!
//! ## 구조체 역할
//! - `Post`: DB의 `posts` 한 행
//! - `PostResponse`: `Post` + 태그 문자열 목록 (모든 게시글 응답의 형태)
//! - `CreatePostRequest`: `POST /api/groups/:groupId/posts` 본문
//! - `UpdatePostRequest`: `PUT /api/posts/:postId` 본문
//! - `PostPasswordRequest`: 삭제, 비공개 조회, 비공개 공감에 쓰는 본문

use super::{ensure_filled, id_as_string};
use crate::error::AppError;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 게시글 엔티티
///
/// `comment_count`는 댓글 생성/삭제에서 직접 증감시키는 비정규화 카운터입니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    #[serde(serialize_with = "id_as_string")]
    pub group_id: i64,
    pub nickname: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing)]
    pub post_password: String,
    pub image_url: Option<String>,
    pub location: Option<String>,
    /// 추억의 순간. RFC 3339 UTC 문자열로 저장합니다.
    pub moment: Option<String>,
    pub is_public: bool,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// 게시글 응답
///
/// `#[serde(flatten)]`: Post의 필드를 중첩 없이 같은 JSON 객체에 펼칩니다.
/// 결과: `{ "id": "1", "title": "...", ..., "tags": ["여행", "바다"] }`
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    #[serde(flatten)]
    pub post: Post,
    pub tags: Vec<String>,
}

/// 게시글 생성 요청
///
/// `groupPassword`는 그룹 비밀번호 검증에만 쓰이고 저장되지 않습니다.
/// `moment`는 RFC 3339 문자열이어야 하며, 형식이 틀리면 역직렬화 단계에서 400이 됩니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub post_password: String,
    pub group_password: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub moment: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub is_public: bool,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        ensure_filled(&[
            self.nickname.as_str(),
            self.title.as_str(),
            self.content.as_str(),
            self.post_password.as_str(),
            self.group_password.as_str(),
        ])
    }
}

/// 게시글 수정 요청
///
/// `tags`가 있으면(빈 배열 포함) 기존 태그 연결을 통째로 교체하고,
/// 없으면 기존 태그를 그대로 둡니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub post_password: String,
    pub nickname: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    pub moment: Option<DateTime<FixedOffset>>,
    pub is_public: Option<bool>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        ensure_filled(&[self.post_password.as_str()])?;
        for value in [&self.nickname, &self.title, &self.content]
            .into_iter()
            .flatten()
        {
            ensure_filled(&[value.as_str()])?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPasswordRequest {
    pub post_password: String,
}

/// moment를 저장용 문자열로 바꿉니다. 오프셋은 UTC로 정규화됩니다.
///
/// 예: `2024-05-01T09:00:00+09:00` → `2024-05-01T00:00:00.000Z`
pub fn moment_to_db(moment: Option<&DateTime<FixedOffset>>) -> Option<String> {
    moment.map(|m| {
        m.with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moment_is_normalized_to_utc() {
        let parsed = DateTime::parse_from_rfc3339("2024-05-01T09:00:00+09:00").unwrap();
        assert_eq!(
            moment_to_db(Some(&parsed)).as_deref(),
            Some("2024-05-01T00:00:00.000Z")
        );
        assert_eq!(moment_to_db(None), None);
    }

    #[test]
    fn invalid_moment_fails_to_deserialize() {
        let body = serde_json::json!({
            "nickname": "a", "title": "t", "content": "c",
            "postPassword": "p", "groupPassword": "g",
            "moment": "yesterday"
        });
        assert!(serde_json::from_value::<CreatePostRequest>(body).is_err());
    }

    #[test]
    fn update_rejects_blank_title_but_allows_absent_fields() {
        let body = serde_json::json!({ "postPassword": "p" });
        let req: UpdatePostRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.tags.is_none());

        let body = serde_json::json!({ "postPassword": "p", "title": "" });
        let req: UpdatePostRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_err());
    }
}
