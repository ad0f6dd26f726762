//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build authentication router
/// - /login: public (no auth required)
/// - /logout, /api/me: protected (session middleware handled at Router level)
pub fn router() -> Router<ServerState> {
    Router::new()
        // Public route - no session middleware applied
        .route("/login", post(handler::login))
        // Protected routes - require a session (handled by global require_session middleware)
        .route("/logout", get(handler::logout))
        .route("/api/me", get(handler::me))
}
