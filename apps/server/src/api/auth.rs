use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::post,
    Router,
};

use super::extract::ApiJson;
use crate::{
    auth::AuthManager,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{respond, LoginRequest, LoginResponse, RegisterRequest},
};

async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<Response> {
    AuthManager::validate_password(&payload.password)?;
    let hash = state.auth.hash_password(&payload.password)?;
    state.user_service.register(&payload.username, hash).await?;
    Ok(respond::<()>(
        StatusCode::CREATED,
        "User registered successfully",
        None,
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Response> {
    // Unknown user and wrong password are reported identically.
    let user = state
        .user_service
        .find_by_username(&payload.username)
        .map_err(|e| match e.kind() {
            willpower_core::errors::ErrorKind::NotFound => ApiError::InvalidCredentials,
            _ => ApiError::from(e),
        })?;
    state
        .auth
        .verify_password(&payload.password, &user.password_hash)?;
    let token = state.auth.issue_token(user.id, &user.username)?;
    tracing::info!(user_id = user.id, "user logged in");
    Ok(respond(
        StatusCode::OK,
        "Login successful",
        Some(LoginResponse {
            token,
            user_id: user.id,
        }),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}
