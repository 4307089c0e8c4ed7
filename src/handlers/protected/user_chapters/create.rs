use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};

use crate::api::{CreateUserChapterRequest, CreateUserChapterResponse};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// POST /user-chapters - record that the caller finished a chapter
///
/// Body: `{"chapter_id": 3, "completed_at": "...", "quiz_score": 87.5}`; only
/// `chapter_id` is required. Unknown chapters answer 404.
pub async fn user_chapter_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<CreateUserChapterRequest>, JsonRejection>,
) -> ApiResult<CreateUserChapterResponse> {
    let Json(request) = payload?;
    let row = state.user_chapters.record_completion(auth.user_id, request).await?;

    Ok(ApiResponse::created(CreateUserChapterResponse {
        message: "User chapter created successfully".to_string(),
        id: row.id,
    }))
}
