//! # 이미지 업로드 저장 서비스
//!
//! 업로드된 파일을 `<유닉스 밀리초><원래 확장자>` 이름으로 업로드 디렉토리에 저장하고,
//! 정적 서빙 경로(`/uploads/...`)를 돌려줍니다.
//!
//! 같은 밀리초에 두 파일이 올라오면 이름이 겹쳐 나중 파일이 덮어씁니다.
//! 크기 제한은 라우터의 `DefaultBodyLimit`이 담당하고, 내용 형식은 검사하지 않습니다.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::path::Path;
use tokio::fs;

/// 업로드 파일이 노출되는 URL 접두사
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// 저장할 파일 이름을 만듭니다.
///
/// # 예시
/// ```text
/// stored_file_name(Some("beach.JPG"), now) → "1718000000123.JPG"
/// stored_file_name(Some("README"), now)    → "1718000000123"
/// stored_file_name(None, now)              → "1718000000123"
/// ```
pub fn stored_file_name(original_name: Option<&str>, now: DateTime<Utc>) -> String {
    // Path::extension(): 마지막 경로 요소의 확장자만 꺼내므로 "../" 같은 경로는 섞이지 않습니다.
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    format!("{}{}", now.timestamp_millis(), extension)
}

/// 이미지를 저장하고 상대 URL을 반환합니다.
///
/// 업로드 디렉토리가 없으면 먼저 만듭니다 (이미 있으면 아무 일도 하지 않음).
pub async fn save_image(
    uploads_path: &Path,
    original_name: Option<&str>,
    bytes: &[u8],
) -> Result<String, AppError> {
    fs::create_dir_all(uploads_path).await?;

    let file_name = stored_file_name(original_name, Utc::now());
    fs::write(uploads_path.join(&file_name), bytes).await?;
    tracing::info!(file = %file_name, size = bytes.len(), "Image stored");

    Ok(format!("{UPLOADS_URL_PREFIX}/{file_name}"))
}
