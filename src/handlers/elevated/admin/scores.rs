use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::summary::UserChapterScoresSummary;

/**
 * GET /user-chapters/summary/all-scores - every student's chapter scores
 *
 * ```json
 * {"usersScores": [{"id": 1, "name": "Ani", "class": "TI-1", "chapterScores": {"C1": 80.0}}]}
 * ```
 *
 * Students without any recorded chapter appear with an empty `chapterScores`.
 */
pub async fn all_scores_get(State(state): State<AppState>) -> ApiResult<UserChapterScoresSummary> {
    let summary = state.user_chapters.scores_summary().await?;
    Ok(ApiResponse::success(summary))
}
