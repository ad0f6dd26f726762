//! In-memory session store
//!
//! Sessions are opaque random tokens handed out as an HttpOnly cookie and
//! kept server-side in a [`DashMap`]. Every successful lookup refreshes the
//! entry, so the TTL is a sliding inactivity window, not an absolute
//! lifetime. Restarting the server drops all sessions.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};

use shared::AppError;
use shared::models::UserRole;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Authenticated user attached to the request by the session middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user: CurrentUser,
    last_seen: DateTime<Utc>,
}

/// Why a token failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// No session with this token (never issued, logged out, or evicted)
    Unknown,
    /// The session existed but sat idle past the TTL
    Expired,
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    ttl: Duration,
    rng: SystemRandom,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::minutes(ttl_minutes),
            rng: SystemRandom::new(),
        }
    }

    /// Issue a fresh session token for the user
    pub fn create(&self, user: CurrentUser) -> Result<String, AppError> {
        let mut bytes = [0u8; 32];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AppError::internal("Failed to generate session token"))?;
        let token = hex::encode(bytes);

        self.sessions.insert(
            token.clone(),
            SessionEntry {
                user,
                last_seen: Utc::now(),
            },
        );
        Ok(token)
    }

    /// Resolve a token to its user, refreshing the inactivity window.
    ///
    /// Expired entries are removed as they are discovered; the caller can
    /// tell an expired session apart from a token that was never valid.
    pub fn resolve(&self, token: &str) -> Result<CurrentUser, SessionError> {
        let now = Utc::now();

        {
            let Some(mut entry) = self.sessions.get_mut(token) else {
                return Err(SessionError::Unknown);
            };
            if now - entry.last_seen <= self.ttl {
                entry.last_seen = now;
                return Ok(entry.user.clone());
            }
            // Guard must be released before the remove below
        }

        self.sessions.remove(token);
        Err(SessionError::Expired)
    }

    /// Drop a session. Returns whether the token was live.
    pub fn remove(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Rewind a session's `last_seen` to simulate idle time
    #[cfg(test)]
    fn backdate(&self, token: &str, minutes: i64) {
        if let Some(mut entry) = self.sessions.get_mut(token) {
            entry.last_seen = Utc::now() - Duration::minutes(minutes);
        }
    }
}
