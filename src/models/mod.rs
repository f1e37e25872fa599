//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `group`: 그룹(Group)과 그룹 요청 본문
//! - `post`: 게시글(Post), 응답 형태(PostResponse), 게시글 요청 본문
//! - `comment`: 댓글(Comment)과 댓글 요청 본문
//! - `tag`: 태그(Tag)
//! - `listing`: 목록 조회 쿼리 파라미터와 페이지 응답
//!
//! ## JSON 규칙
//! - 필드 이름은 camelCase (`#[serde(rename_all = "camelCase")]`)
//! - 모든 ID는 문자열로 직렬화합니다 (`id_as_string`). 큰 정수가 JavaScript에서
//!   정밀도를 잃지 않게 하려는 것입니다.
//! - 저장된 비밀번호 필드는 `#[serde(skip_serializing)]`로 응답에서 빠집니다.

pub mod comment;
pub mod group;
pub mod listing;
pub mod post;
pub mod tag;

pub use comment::*;
pub use group::*;
pub use listing::*;
pub use post::*;
pub use tag::*;

use crate::error::AppError;
use serde::{Serialize, Serializer};

/// i64 ID를 JSON 문자열로 직렬화합니다. (`42` → `"42"`)
///
/// `#[serde(serialize_with = "id_as_string")]`로 필드에 붙여 사용합니다.
pub fn id_as_string<S>(id: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(id)
}

/// 필수 문자열 필드가 비어 있으면 400을 반환합니다.
///
/// 필드 누락은 역직렬화 단계에서 이미 400이 되므로,
/// 여기서는 `""`처럼 값은 있지만 비어 있는 경우만 걸러냅니다.
pub fn ensure_filled(values: &[&str]) -> Result<(), AppError> {
    if values.iter().any(|v| v.is_empty()) {
        return Err(AppError::bad_request());
    }
    Ok(())
}

/// `GET /.../is-public` 응답 및 조회 결과
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub is_public: bool,
}
