use axum::extract::State;

use crate::api::{AdminSummary, StudentSummary};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /users/summary/students - `{totalStudents, classCounts}`, classes trimmed
pub async fn student_summary_get(State(state): State<AppState>) -> ApiResult<StudentSummary> {
    Ok(ApiResponse::success(state.users.student_summary().await?))
}

/// GET /users/summary/admins
pub async fn admin_summary_get(State(state): State<AppState>) -> ApiResult<AdminSummary> {
    Ok(ApiResponse::success(state.users.admin_summary().await?))
}
