//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로
//! - `UPLOADS_PATH`: 업로드 이미지 저장 디렉토리
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `UPLOAD_MAX_BYTES`: 이미지 업로드 요청 본문의 최대 크기

use std::env;

/// 기본 포트
pub const DEFAULT_PORT: u16 = 5000;

/// 업로드 본문 기본 한도 (10 MiB)
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 main에서만 사용합니다.
/// 핸들러가 필요로 하는 값은 `AppState`로 옮겨 담습니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 연결 문자열 (예: "sqlite:chueok.db?mode=rwc")
    pub database_url: String,
    /// 업로드 이미지가 저장되는 디렉토리 경로
    pub uploads_path: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 5000)
    pub port: u16,
    /// `POST /api/image` 요청 본문 최대 바이트 수
    pub upload_max_bytes: usize,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 항목에 기본값이 있어서 환경변수가 하나도 없어도 동작합니다.
    /// 숫자 항목을 파싱하지 못하면 경고 없이 기본값으로 돌아갑니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 키 조회 함수로 설정을 만듭니다.
    ///
    /// `from_env`는 이 함수에 `env::var`를 넘길 뿐이고,
    /// 테스트에서는 프로세스 환경변수를 건드리지 않고 HashMap 등을 넘깁니다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:chueok.db?mode=rwc".to_string()),
            uploads_path: lookup("UPLOADS_PATH").unwrap_or_else(|| "uploads".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            // .and_then(|v| v.parse().ok()): 값이 있고 파싱에 성공한 경우에만 Some
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            upload_max_bytes: lookup("UPLOAD_MAX_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_UPLOAD_MAX_BYTES),
        }
    }
}
