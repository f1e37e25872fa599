//! # 태그 모델 정의
//!
//! 태그는 여러 게시글이 공유하는 라벨입니다.
//! `content`가 유일 키이며, 같은 문자열이면 같은 태그 행을 가리킵니다.

use serde::Serialize;

/// 태그 엔티티. DB의 `tags` 테이블 한 행(row)에 대응합니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tag {
    #[serde(serialize_with = "super::id_as_string")]
    pub id: i64,
    /// 태그 문자열. 공백 제거나 대소문자 변환 없이 그대로 저장합니다.
    pub content: String,
}
