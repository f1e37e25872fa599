//! # 접근 제어 게이트
//!
//! 로그인 세션이나 토큰이 없는 대신, 리소스마다 저장된 비밀번호를
//! 요청 본문에 담아 보내야 수정/삭제/비공개 조회를 할 수 있습니다.
//!
//! ## 검사 순서
//! 1. 리소스 존재 확인: 없으면 404 (핸들러가 먼저 조회하며 `Resource::not_found` 사용)
//! 2. 비밀번호 비교: 다르면 401 (`verify_secret`)
//!
//! 공개 리소스의 일반 조회는 게이트를 거치지 않습니다.
//! 비공개 리소스를 일반 조회 경로로 요청하면 403입니다 (`ensure_public`).
//!
//! 비밀번호는 해시 없이 저장된 평문과 그대로 비교합니다.

use crate::error::{AppError, MSG_WRONG_PASSWORD};
use crate::models::{Group, Post};

/// 게이트가 보호하는 리소스 종류. 에러 메시지와 로그에 씁니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Group,
    Post,
    Comment,
}

impl Resource {
    pub fn label(self) -> &'static str {
        match self {
            Resource::Group => "group",
            Resource::Post => "post",
            Resource::Comment => "comment",
        }
    }

    /// 리소스별 404 에러
    pub fn not_found(self) -> AppError {
        let message = match self {
            Resource::Group => "그룹을 찾을 수 없습니다.",
            Resource::Post => "게시글을 찾을 수 없습니다.",
            Resource::Comment => "댓글이 존재하지 않습니다.",
        };
        AppError::not_found(message)
    }
}

/// 공개/비공개 플래그가 있는 리소스 (그룹, 게시글)
///
/// 댓글은 공개 여부가 없으므로 구현하지 않습니다.
pub trait Visible {
    /// 비공개일 때 403 응답에 담을 메시지
    const PRIVATE_MESSAGE: &'static str;

    fn is_public(&self) -> bool;
}

impl Visible for Group {
    const PRIVATE_MESSAGE: &'static str = "비공개 그룹입니다!";

    fn is_public(&self) -> bool {
        self.is_public
    }
}

impl Visible for Post {
    const PRIVATE_MESSAGE: &'static str = "비공개 게시글입니다!";

    fn is_public(&self) -> bool {
        self.is_public
    }
}

/// 저장된 비밀번호와 요청 비밀번호를 비교합니다.
///
/// 정확히 같은 문자열이어야 통과합니다. 공백이나 대소문자도 구분합니다.
pub fn verify_secret(
    stored: &str,
    supplied: &str,
    resource: Resource,
    id: i64,
) -> Result<(), AppError> {
    if stored == supplied {
        return Ok(());
    }
    // 비밀번호 값 자체는 로그에 남기지 않습니다.
    tracing::warn!(resource = resource.label(), id, "Password mismatch");
    Err(AppError::Unauthorized(MSG_WRONG_PASSWORD.to_string()))
}

/// 비공개 리소스면 403을 반환합니다.
pub fn ensure_public<T: Visible>(item: &T) -> Result<(), AppError> {
    if item.is_public() {
        Ok(())
    } else {
        Err(AppError::Forbidden(T::PRIVATE_MESSAGE.to_string()))
    }
}
