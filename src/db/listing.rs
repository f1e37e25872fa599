//! # 목록 쿼리 빌더 보조 모듈
//!
//! 쿼리 파라미터(`page`, `pageSize`, `sortBy`, `keyword`, `isPublic`)를
//! SQL 조각과 바인딩 값으로 해석합니다. 실제 SQL 조립은 각 엔티티 모듈이
//! `sqlx::QueryBuilder`로 하고, 이 모듈은 순수 함수만 가집니다.
//!
//! ## 규칙
//! - page는 1부터 시작 (기본 1), pageSize 기본 10, 둘 다 1 미만이면 400
//! - pageSize 상한은 없습니다
//! - offset = (page - 1) * pageSize
//! - 정렬은 항상 내림차순이고, 같은 값이면 `id DESC`로 순서를 고정합니다

use crate::error::AppError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// 검증된 페이지 요청
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// 쿼리 파라미터에서 페이지 요청을 만듭니다. 값이 없으면 기본값을 씁니다.
    pub fn from_query(page: Option<i64>, page_size: Option<i64>) -> Result<Self, AppError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 1 || page_size < 1 {
            return Err(AppError::bad_request());
        }
        Ok(Self { page, page_size })
    }

    /// 건너뛸 행 수. 극단적인 값에서도 오버플로로 패닉하지 않도록 포화 연산을 씁니다.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// 그룹 목록 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSort {
    Latest,
    MostPosted,
    MostLiked,
}

impl GroupSort {
    /// 알 수 없는 값이나 누락은 `Latest`로 처리합니다.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("mostPosted") => GroupSort::MostPosted,
            Some("mostLiked") => GroupSort::MostLiked,
            _ => GroupSort::Latest,
        }
    }

    /// ORDER BY 절. 사용자 입력이 아닌 고정 문자열만 반환하므로 SQL에 직접 넣어도 됩니다.
    pub fn order_by(self) -> &'static str {
        match self {
            GroupSort::Latest => "created_at DESC, id DESC",
            GroupSort::MostPosted => "post_count DESC, id DESC",
            GroupSort::MostLiked => "group_like_count DESC, id DESC",
        }
    }
}

/// 게시글 목록 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSort {
    Latest,
    MostCommented,
    MostLiked,
}

impl PostSort {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("mostCommented") => PostSort::MostCommented,
            Some("mostLiked") => PostSort::MostLiked,
            _ => PostSort::Latest,
        }
    }

    pub fn order_by(self) -> &'static str {
        match self {
            PostSort::Latest => "created_at DESC, id DESC",
            PostSort::MostCommented => "comment_count DESC, id DESC",
            PostSort::MostLiked => "like_count DESC, id DESC",
        }
    }
}

/// `isPublic` 쿼리 값 해석. 정확히 "true"/"false"일 때만 필터가 됩니다.
pub fn visibility_filter(raw: Option<&str>) -> Option<bool> {
    match raw {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// 빈 키워드는 필터가 없는 것으로 봅니다.
pub fn keyword_filter(raw: Option<&str>) -> Option<&str> {
    raw.filter(|k| !k.is_empty())
}

/// 부분 문자열 검색용 LIKE 패턴을 만듭니다.
///
/// 키워드 안의 `%`, `_`, `\`는 와일드카드가 아니라 글자 그대로 찾아야 하므로
/// `\`로 이스케이프합니다. SQL 쪽에서는 `LIKE ? ESCAPE '\'`와 함께 써야 합니다.
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
