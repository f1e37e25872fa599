//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{ "message": "..." }` 형태의 HTTP 응답으로 변환
//!
//! 클라이언트에는 HTTP 상태 코드와 메시지 문자열만 전달합니다.
//! 기계가 읽는 에러 코드는 따로 두지 않습니다.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 잘못된 요청(400)의 기본 메시지
pub const MSG_BAD_REQUEST: &str = "잘못된 요청입니다.";
/// 비밀번호 불일치(401) 메시지
pub const MSG_WRONG_PASSWORD: &str = "비밀번호가 틀렸습니다.";
/// 업로드 본문 크기 초과(413) 메시지
pub const MSG_PAYLOAD_TOO_LARGE: &str = "파일이 너무 큽니다.";
/// 서버 내부 오류(500) 메시지. 실제 원인은 로그에만 남깁니다.
pub const MSG_INTERNAL: &str = "서버 에러가 발생했습니다.";

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 본문/쿼리/경로 형식이 잘못됨 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 비밀번호 불일치 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 비공개 리소스를 일반 조회 경로로 요청함 (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500, 단 RowNotFound는 404)
    /// #[from]: sqlx 함수 결과에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// multipart 본문을 읽다가 실패함 (HTTP 400)
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),
}

impl AppError {
    /// 기본 메시지를 가진 400 에러
    pub fn bad_request() -> Self {
        AppError::BadRequest(MSG_BAD_REQUEST.to_string())
    }

    /// 리소스 이름을 받아 "OO을(를) 찾을 수 없습니다." 형태의 404 에러를 만듭니다.
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }
}

// ── axum 추출기 거부(rejection) → AppError ──
// axum은 JSON 필드 누락을 422로 돌려주지만, 이 API는 형식 오류를 모두 400으로 통일합니다.
// 자세한 원인은 debug 로그에만 남깁니다.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        AppError::bad_request()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        AppError::bad_request()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameter: {}", rejection.body_text());
        AppError::bad_request()
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!("Rejected multipart body: {}", rejection.body_text());
        AppError::bad_request()
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, IO, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            // 본문 크기 제한 초과는 413, 그 외 multipart 형식 오류는 400
            AppError::Multipart(ref e) => {
                tracing::debug!("Multipart error: {}", e);
                match e.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => (
                        StatusCode::PAYLOAD_TOO_LARGE,
                        MSG_PAYLOAD_TOO_LARGE.to_string(),
                    ),
                    _ => (StatusCode::BAD_REQUEST, MSG_BAD_REQUEST.to_string()),
                }
            }
            // fetch_one이 0행을 만나면 RowNotFound가 됩니다. 존재하지 않는 리소스로 취급합니다.
            AppError::Database(sqlx::Error::RowNotFound) => (
                StatusCode::NOT_FOUND,
                "리소스를 찾을 수 없습니다.".to_string(),
            ),
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_string())
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_string())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_string())
            }
        };

        // 결과: { "message": "그룹을 찾을 수 없습니다." }
        (status, Json(json!({ "message": message }))).into_response()
    }
}
