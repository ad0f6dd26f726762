//! Usuario Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role
///
/// Stored as lowercase TEXT in the database and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    /// Argon2 password hash; never serialized to JSON
    #[serde(skip_serializing, default)]
    pub hash_pass: String,
    pub display_name: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// User response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl From<Usuario> for UsuarioResponse {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            username: u.username,
            display_name: u.display_name,
            role: u.role,
            is_active: u.is_active,
        }
    }
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioCreate {
    pub username: String,
    pub password: String,
    /// Defaults to the username when omitted
    pub display_name: Option<String>,
    pub role: UserRole,
}

/// Update user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsuarioUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}
