use axum::{extract::State, Extension};

use crate::api::UserResponse;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /users/profile - the authenticated user's account
pub async fn profile_get(State(state): State<AppState>, Extension(auth): Extension<AuthUser>) -> ApiResult<UserResponse> {
    let profile = state.users.profile(auth.user_id).await?;
    Ok(ApiResponse::success(profile))
}
