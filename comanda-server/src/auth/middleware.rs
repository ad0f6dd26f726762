//! Session middleware
//!
//! Axum middleware resolving the session cookie into a [`CurrentUser`]
//! request extension, plus the admin gate layered onto manager routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, SESSION_COOKIE, SessionError};
use crate::core::ServerState;
use crate::security_log;
use shared::AppError;

/// Session middleware: every route except login and health requires a
/// live session.
///
/// The token comes from the `session` cookie. On success the resolved
/// [`CurrentUser`] is injected into the request extensions and the
/// session's inactivity window restarts.
///
/// # Skipped paths
///
/// - `OPTIONS *` (CORS preflight)
/// - `/login`
/// - `/health`
///
/// # Errors
///
/// | Failure | Response |
/// |---------|----------|
/// | No cookie | 401 NotAuthenticated |
/// | Unknown token | 401 NotAuthenticated |
/// | Idle past TTL | 401 SessionExpired |
pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Let CORS preflight through unauthenticated
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let is_public_route = path == "/login" || path == "/health";
    if is_public_route {
        return Ok(next.run(req).await);
    }

    let token = match session_cookie(req.headers()) {
        Some(token) => token,
        None => {
            security_log!("WARN", "session_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match state.sessions.resolve(&token) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(SessionError::Expired) => {
            security_log!("WARN", "session_expired", uri = format!("{:?}", req.uri()));
            Err(AppError::session_expired())
        }
        Err(SessionError::Unknown) => {
            security_log!("WARN", "session_invalid", uri = format!("{:?}", req.uri()));
            Err(AppError::unauthorized())
        }
    }
}

/// Admin gate: requires `CurrentUser.role == admin`
///
/// Layered after [`require_session`], so a missing extension means the
/// request never authenticated.
///
/// # Errors
///
/// Non-admin users get 403 AdminRequired.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            username = user.username.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::new(shared::ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}

/// Pull the session token out of the `Cookie` header
pub fn session_cookie(headers: &http::HeaderMap) -> Option<String> {
    let cookies = headers.get(http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
