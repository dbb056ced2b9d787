//! Authentication handlers: register, login, refresh, logout, introspect.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use librauth_core::error::{AppError, ErrorKind};

use crate::dto::request::{
    IntrospectRequest, LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest,
};
use crate::dto::response::{
    AuthResponse, IntrospectResponse, MessageResponse, RefreshResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `POST /auth/register` — create a user and issue an initial token pair.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let auth = state
        .auth_service
        .register(&payload.email, &payload.username, &payload.password)
        .await?;

    let response = AuthResponse {
        message: "User registered successfully".to_string(),
        user: auth.user.into(),
        tokens: auth.tokens.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /auth/login` — authenticate by email or username.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let auth = state
        .auth_service
        .login(&payload.identifier, &payload.password)
        .await?;

    let response = AuthResponse {
        message: "Login successful".to_string(),
        user: auth.user.into(),
        tokens: auth.tokens.into(),
    };
    Ok(Json(response))
}

/// `POST /auth/refresh` — mint a new access token from a refresh token.
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let access = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(RefreshResponse {
        access_token: access.token,
        access_jti: access.jti,
        access_expires_at: access.expires_at,
    }))
}

/// `POST /auth/logout` — revoke the presented access session and, when the
/// body carries a refresh token, the refresh session too.
///
/// The body is optional; logout with only the Authorization header is valid.
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Option<Json<LogoutRequest>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let refresh_token = payload.and_then(|Json(body)| body.refresh_token);

    state
        .auth_service
        .logout(&user.access_jti, refresh_token.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}

/// `POST /auth/introspect` — diagnostic view of any token.
///
/// Decode failures (bad signature, garbage input) are reported as 400: the
/// caller supplied something that is not a token, rather than an expired or
/// revoked one.
pub async fn introspect(
    State(state): State<AppState>,
    Json(payload): Json<IntrospectRequest>,
) -> Result<Json<IntrospectResponse>, ApiError> {
    let report = state
        .validator
        .introspect(&payload.token)
        .await
        .map_err(|err| match err.kind {
            ErrorKind::InvalidSignature | ErrorKind::MalformedToken => {
                AppError::validation(err.message)
            }
            _ => err,
        })?;

    Ok(Json(report.into()))
}
