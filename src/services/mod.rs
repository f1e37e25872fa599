//! # 서비스 모듈
//!
//! DB 쿼리도 HTTP 처리도 아닌 규칙과 파일 I/O를 모아둔 모듈입니다.
//! - `access`: 비밀번호 게이트 (평문 비교), 비공개 리소스 차단
//! - `upload`: 업로드 이미지를 디스크에 저장하고 URL을 만듦

pub mod access;
pub mod upload;
