// handlers/public/auth/login.rs - POST /api/v1/auth/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/**
 * POST /auth/login - Authenticate with email and password
 *
 * Input: `{"email": "...", "password": "..."}`
 * Output: `{"message": "Login successful", "token": "eyJhbGciOiJIUzI1NiI..."}`
 *
 * Unknown email and wrong password both answer 401 with the same message.
 */
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = payload?;
    request.validate().map_err(ApiError::from_field_errors)?;

    let token = state.users.login(&request.email, &request.password).await.map_err(|e| {
        tracing::warn!("Failed login for {}", request.email);
        ApiError::from(e)
    })?;

    Ok(ApiResponse::success(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}
