// handlers/protected/profile/image.rs - POST /api/v1/users/profile/image handler

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Extension,
};
use std::path::Path;
use tracing::{error, info};

use super::utils::{unique_file_name, PROFILE_IMAGE_DIR, PROFILE_IMAGE_FIELD};
use crate::api::ProfileImageResponse;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/**
 * POST /users/profile/image - Replace the caller's profile picture
 *
 * Expects `multipart/form-data` with a file part named `profile_image`.
 * The file lands in `<upload_dir>/profile_images/<uuid>_<name><ext>` and is
 * served back under `<base_url>/uploads/profile_images/`.
 */
pub async fn profile_image_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<ProfileImageResponse> {
    let mut multipart =
        multipart.map_err(|e| ApiError::bad_request(format!("Failed to get profile image file: {}", e.body_text())))?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(PROFILE_IMAGE_FIELD) {
            continue;
        }
        let original = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        upload = Some((original, data));
        break;
    }

    let (original, data) = upload.ok_or_else(|| ApiError::bad_request("Failed to get profile image file"))?;
    if original.is_empty() {
        return Err(ApiError::bad_request("Failed to get profile image file: missing file name"));
    }

    let file_name = unique_file_name(&original);
    let dir = Path::new(&state.config.server.upload_dir).join(PROFILE_IMAGE_DIR);

    tokio::fs::create_dir_all(&dir).await.map_err(|e| {
        error!("Failed to create upload directory {}: {}", dir.display(), e);
        ApiError::internal_server_error("Failed to create upload directory")
    })?;

    let path = dir.join(&file_name);
    tokio::fs::write(&path, &data).await.map_err(|e| {
        error!("Failed to save uploaded file {}: {}", path.display(), e);
        ApiError::internal_server_error("Failed to save profile image")
    })?;

    let profile_url = format!("{}/uploads/{}/{}", state.config.server.base_url, PROFILE_IMAGE_DIR, file_name);

    if let Err(e) = state.users.update_profile_url(auth.user_id, &profile_url).await {
        // Keep the directory free of images no user points at
        if let Err(rm) = tokio::fs::remove_file(&path).await {
            error!("Failed to remove orphaned upload {}: {}", path.display(), rm);
        }
        return Err(e.into());
    }

    info!(
        "User {} uploaded {} ({} bytes) as {}",
        auth.user_id,
        original,
        data.len(),
        path.display()
    );

    Ok(ApiResponse::success(ProfileImageResponse {
        message: "Profile image updated successfully".to_string(),
        profile_url,
    }))
}
