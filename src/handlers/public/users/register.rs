// handlers/public/users/register.rs - POST /api/v1/users handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::{CreateUserRequest, MessageResponse};
use crate::database::models::Role;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /users - register a student account
///
/// Duplicate email answers 409, failed field validation 400 with `field_errors`.
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(request) = payload?;
    request.validate().map_err(ApiError::from_field_errors)?;

    state.users.register(request, Role::Mahasiswa).await?;

    Ok(ApiResponse::created(MessageResponse::new("User created successfully")))
}
