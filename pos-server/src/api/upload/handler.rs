//! Image Upload Handler
//!
//! Accepts a base64-encoded image (raw or data URL), verifies it actually
//! decodes as an image, and stores it under `work_dir/uploads/<uuid>.<ext>`.

use axum::{
    Json,
    extract::{Extension, State},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum decoded file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Base64 payload, optionally prefixed with `data:image/...;base64,`
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub url: String,
    pub size: usize,
    pub format: String,
    pub mime: String,
}

fn strip_data_url(payload: &str) -> &str {
    match payload.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => payload,
    }
}

fn extension_of(format: ImageFormat) -> AppResult<&'static str> {
    match format {
        ImageFormat::Png => Ok("png"),
        ImageFormat::Jpeg => Ok("jpg"),
        ImageFormat::WebP => Ok("webp"),
        other => Err(AppError::validation(format!(
            "Unsupported image format: {:?}",
            other
        ))),
    }
}

/// POST /api/upload
pub async fn upload(
    State(state): State<ServerState>,
    Extension(_user): Extension<CurrentUser>,
    Json(payload): Json<UploadRequest>,
) -> AppResult<Json<UploadResponse>> {
    let data = BASE64
        .decode(strip_data_url(&payload.image))
        .map_err(|e| AppError::validation(format!("Invalid base64 payload: {}", e)))?;

    if data.is_empty() {
        return Err(AppError::validation("Empty image payload"));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "Image too large, maximum is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let format = image::guess_format(&data)
        .map_err(|e| AppError::validation(format!("Unrecognized image data: {}", e)))?;
    let ext = extension_of(format)?;

    // The data must actually decode, not just carry a valid magic number
    image::load_from_memory(&data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    let uploads_dir = state.uploads_dir();
    std::fs::create_dir_all(&uploads_dir)
        .map_err(|e| AppError::internal(format!("Failed to create uploads directory: {}", e)))?;

    let filename = format!("{}.{}", Uuid::new_v4(), ext);
    let path = uploads_dir.join(&filename);
    std::fs::write(&path, &data)
        .map_err(|e| AppError::internal(format!("Failed to store upload: {}", e)))?;

    let mime = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();

    Ok(Json(UploadResponse {
        url: format!("/uploads/{}", filename),
        filename,
        size: data.len(),
        format: ext.to_string(),
        mime,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_url() {
        assert_eq!(strip_data_url("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_url("AAAA"), "AAAA");
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_of(ImageFormat::Png).unwrap(), "png");
        assert_eq!(extension_of(ImageFormat::Jpeg).unwrap(), "jpg");
        assert!(extension_of(ImageFormat::Gif).is_err());
    }
}
