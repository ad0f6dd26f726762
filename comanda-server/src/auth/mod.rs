//! Authentication module
//!
//! Cookie-based sessions backed by an in-memory store:
//! - [`SessionStore`] holds the live sessions with a sliding TTL
//! - [`CurrentUser`] is the per-request user context
//! - [`require_session`] resolves the cookie on every protected route
//! - [`require_admin`] gates the manager routes
//! - [`password`] wraps argon2 hashing and verification

pub mod middleware;
pub mod password;
pub mod session;

pub use middleware::{require_admin, require_session, session_cookie};
pub use session::{CurrentUser, SESSION_COOKIE, SessionError, SessionStore};
