//! Comanda Server - restaurant order-taking backend
//!
//! # Overview
//!
//! Waitstaff open a mesa, add items to its comanda and finalize it;
//! administrators manage the catalog and read sales reports. The core
//! pieces:
//!
//! - **Order engine** (`orders`): per-mesa serialized comanda lifecycle
//! - **Database** (`db`): SQLite via sqlx, embedded migrations
//! - **Authentication** (`auth`): cookie sessions + argon2 hashing
//! - **HTTP API** (`api`): axum routers and JSON handlers
//!
//! # Module structure
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # sessions, password hashing, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── orders/        # comanda engine
//! ├── db/            # pool, migrations, repositories
//! └── utils/         # logging, environment setup
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, SessionStore};
pub use core::{Config, Server, ServerState};
pub use orders::ComandaEngine;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::setup_environment;

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______                                 __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
