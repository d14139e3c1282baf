//! Axum route handlers for the auth surface consumed by the dashboard:
//! signup, login, logout, current-user read and update.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::user::{User, UserUpdate};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    // Accepted but unchecked — the reference session store is mocked.
    #[allow(dead_code)]
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

/// Pulls the bearer token out of the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

/// Resolves the calling user or rejects with 401.
pub async fn require_user(headers: &HeaderMap, state: &AppState) -> Result<User, AppError> {
    let token = bearer_token(headers)?;
    state
        .auth
        .current_user(token)
        .await
        .ok_or(AppError::Unauthorized)
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    let (token, user) = state
        .auth
        .create_session(request.email.trim(), request.name.as_deref())
        .await;
    tracing::info!("Signed up {}", user.email);
    Ok(Json(SessionResponse { token, user }))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    let (token, user) = state.auth.create_session(request.email.trim(), None).await;
    Ok(Json(SessionResponse { token, user }))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = bearer_token(&headers)?;
    state.auth.end_session(token).await;
    Ok(Json(serde_json::json!({ "loggedOut": true })))
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, AppError> {
    let user = require_user(&headers, &state).await?;
    Ok(Json(user))
}

/// PATCH /api/v1/auth/me
pub async fn handle_update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>, AppError> {
    let token = bearer_token(&headers)?;
    state
        .auth
        .update_user(token, update)
        .await
        .map(Json)
        .ok_or(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_or_malformed_header_is_unauthorized() {
        let headers = HeaderMap::new();
        assert!(matches!(bearer_token(&headers), Err(AppError::Unauthorized)));

        let mut basic = HeaderMap::new();
        basic.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert!(matches!(bearer_token(&basic), Err(AppError::Unauthorized)));
    }
}
