use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};

use crate::api::{ChapterCompletionResponse, CheckChapterCompletionRequest};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// POST /user-chapters/check-completion
pub async fn check_completion_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<CheckChapterCompletionRequest>, JsonRejection>,
) -> ApiResult<ChapterCompletionResponse> {
    let Json(request) = payload?;
    let is_completed = state
        .user_chapters
        .has_completed(auth.user_id, request.chapter_id)
        .await?;

    Ok(ApiResponse::success(ChapterCompletionResponse::new(
        auth.user_id,
        request.chapter_id,
        is_completed,
    )))
}
