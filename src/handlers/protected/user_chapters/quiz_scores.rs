use axum::{extract::State, Extension};

use crate::api::QuizScoresResponse;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /user-chapters - the caller's quiz results, one entry per recorded chapter
pub async fn quiz_scores_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<QuizScoresResponse> {
    let data = state.user_chapters.quiz_scores(auth.user_id).await?;

    Ok(ApiResponse::success(QuizScoresResponse {
        message: "User quiz scores retrieved successfully".to_string(),
        data,
    }))
}
