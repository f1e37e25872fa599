//! # 요청 추출기(Extractor) 모듈
//!
//! axum 기본 추출기(`Json`, `Query`, `Path`)를 감싸서, 거부(rejection) 시
//! axum 자체 응답(422, 텍스트 본문) 대신 `AppError`(400, `{ "message": ... }`)를
//! 돌려주게 합니다.
//!
//! `#[derive(FromRequest)]` + `#[from_request(via(...), rejection(...))]`:
//! axum "macros" feature가 제공하는 매크로로, 내부 추출기를 그대로 사용하되
//! 거부 타입만 `From<Rejection> for AppError` 변환을 거쳐 바꿉니다.
//! 변환 구현은 `error.rs`에 있습니다.

use crate::error::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON 요청 본문. Content-Type 누락, 문법 오류, 필드 누락/타입 오류 모두 400입니다.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// URL 쿼리 파라미터. `page=abc`처럼 타입이 맞지 않으면 400입니다.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// URL 경로 파라미터. `/api/groups/abc`처럼 정수가 아닌 ID는 400입니다.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
