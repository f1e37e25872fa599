//! # 이미지 업로드 핸들러
//!
//! `POST /api/image` (multipart/form-data, 필드 이름 `image`)
//! → `{ "imageUrl": "/uploads/1718000000123.png" }`
//!
//! 저장은 `services::upload`가 맡고, 저장된 파일은 라우터의
//! `/uploads` 정적 서빙으로 내려받을 수 있습니다.

use crate::{error::AppError, routes::AppState, services::upload};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde_json::{json, Value};

const IMAGE_FIELD: &str = "image";

pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    // Content-Type이 multipart가 아니면 거부 → 400
    let mut multipart = multipart?;

    // `image`가 아닌 필드는 건너뜁니다.
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await?;

        let image_url =
            upload::save_image(&state.uploads_path, file_name.as_deref(), &bytes).await?;
        return Ok(Json(json!({ "imageUrl": image_url })));
    }

    Err(AppError::BadRequest("이미지 파일이 필요합니다.".to_string()))
}
