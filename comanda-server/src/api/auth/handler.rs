//! Authentication Handlers
//!
//! Handles login, logout and the current-user endpoint

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::Deserialize;

use crate::auth::{CurrentUser, SESSION_COOKIE, password, session_cookie};
use crate::core::ServerState;
use crate::db::repository;
use shared::models::UsuarioResponse;
use shared::{AppError, ErrorCode};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /login
///
/// Authenticates credentials and sets the session cookie. The user info
/// comes back in the body so clients need no second round trip.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<(http::HeaderMap, Json<UsuarioResponse>), AppError> {
    let username = req.username.clone();

    let usuario = repository::usuario::find_by_username(state.pool(), &username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Check authentication result - unified error message to prevent username enumeration
    let usuario = match usuario {
        Some(u) => {
            // User found - check active status
            if !u.is_active {
                return Err(AppError::forbidden("Account has been disabled".to_string()));
            }

            // Verify password
            let password_valid = password::verify_password(&req.password, &u.hash_pass)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(username = %username, "Login failed - invalid credentials");
                return Err(AppError::invalid(
                    "Invalid username or password".to_string(),
                ));
            }

            u
        }
        None => {
            tracing::warn!(username = %username, "Login failed - user not found");
            return Err(AppError::invalid(
                "Invalid username or password".to_string(),
            ));
        }
    };

    let token = state.sessions.create(CurrentUser {
        id: usuario.id,
        username: usuario.username.clone(),
        display_name: usuario.display_name.clone(),
        role: usuario.role,
    })?;

    let mut headers = http::HeaderMap::new();
    let cookie = format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/");
    headers.insert(
        http::header::SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| AppError::internal("Invalid session cookie value"))?,
    );

    tracing::info!(
        user_id = usuario.id,
        username = %usuario.username,
        role = %usuario.role,
        "User logged in successfully"
    );

    Ok((headers, Json(UsuarioResponse::from(usuario))))
}

/// GET /api/me
///
/// Reads fresh user data so a deactivation or role change shows up
/// without waiting for the session to expire.
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UsuarioResponse>, AppError> {
    let usuario = repository::usuario::find_by_id(state.pool(), user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(UsuarioResponse::from(usuario)))
}

/// GET /logout
///
/// Removes the session and expires the cookie.
pub async fn logout(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    headers: http::HeaderMap,
) -> Result<(http::HeaderMap, Json<()>), AppError> {
    if let Some(token) = session_cookie(&headers) {
        state.sessions.remove(&token);
    }

    let mut response_headers = http::HeaderMap::new();
    let cookie = format!("{SESSION_COOKIE}=; Max-Age=0; HttpOnly; SameSite=Lax; Path=/");
    response_headers.insert(
        http::header::SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| AppError::internal("Invalid session cookie value"))?,
    );

    tracing::info!(
        user_id = user.id,
        username = %user.username,
        "User logged out"
    );

    Ok((response_headers, Json(())))
}
