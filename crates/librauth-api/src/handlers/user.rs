//! User profile handler.

use axum::Json;
use axum::extract::State;

use librauth_core::error::AppError;

use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/profile` — the authenticated user's own record.
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let record = state
        .users
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(record.into()))
}
