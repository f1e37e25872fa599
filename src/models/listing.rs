//! # 목록 조회 모델
//!
//! - `ListQuery`: 그룹/게시글 목록의 쿼리 파라미터
//!   (`?page=1&pageSize=10&sortBy=latest&keyword=...&isPublic=true`)
//! - `PageQuery`: 댓글 목록처럼 페이지만 받는 쿼리 파라미터
//! - `Paginated<T>`: 페이지 응답 `{ currentPage, totalPages, totalItemCount, data }`
//!
//! 숫자 파라미터를 `Option<i64>`로 받으므로 `page=abc`는 400이 됩니다.
//! 범위 검사와 정렬 키 해석은 `db::listing`에서 합니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub keyword: Option<String>,
    /// "true"/"false" 문자열일 때만 필터로 쓰고, 그 외 값은 무시합니다.
    pub is_public: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// 페이지 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_item_count: i64,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// `totalPages = ceil(totalItemCount / pageSize)`
    ///
    /// 항목이 0개면 totalPages도 0입니다.
    pub fn new(current_page: i64, page_size: i64, total_item_count: i64, data: Vec<T>) -> Self {
        // 정수 올림 나눗셈. page_size가 매우 커도 더하기 없이 계산해 오버플로가 없습니다.
        let total_pages = if total_item_count <= 0 {
            0
        } else {
            (total_item_count - 1) / page_size + 1
        };
        Self {
            current_page,
            total_pages,
            total_item_count,
            data,
        }
    }
}
