use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::api::{CreateUserRequest, MessageResponse, UserResponse};
use crate::database::models::Role;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// POST /users/admin - create another admin account
pub async fn admin_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(request) = payload?;
    request.validate().map_err(ApiError::from_field_errors)?;

    let admin = state.users.register(request, Role::Admin).await?;
    tracing::info!("Admin {} created admin account {}", auth.user_id, admin.email);

    Ok(ApiResponse::created(MessageResponse::new("Admin user created successfully")))
}

/// GET /users/mahasiswa - all students, ascending id
pub async fn students_get(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    Ok(ApiResponse::success(state.users.students().await?))
}

/// DELETE /users/:id
///
/// The id is taken as a raw segment so a non-numeric value answers with our
/// own 400 body instead of the extractor's plain-text rejection.
pub async fn user_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<MessageResponse> {
    let id: i64 = id
        .parse()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request("Invalid user ID"))?;

    state.users.delete_user(id).await?;

    Ok(ApiResponse::success(MessageResponse::new(format!(
        "User with ID {} deleted successfully",
        id
    ))))
}
