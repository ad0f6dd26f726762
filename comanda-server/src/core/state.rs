use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{SessionStore, password};
use crate::core::Config;
use crate::db::DbService;
use crate::orders::ComandaEngine;
use shared::AppError;
use shared::models::UserRole;

/// Username of the seeded administrator account
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Initial password of the seeded administrator account
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Server state holding every shared service
///
/// Cloning is cheap: the pool, the session store and the engine are all
/// shared handles.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Configuration (immutable) |
/// | db | DbService | SQLite connection pool |
/// | sessions | Arc<SessionStore> | Live sessions |
/// | engine | Arc<ComandaEngine> | Comanda operations |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Database service
    pub db: DbService,
    /// In-memory session store
    pub sessions: Arc<SessionStore>,
    /// Comanda engine (per-mesa locking and transactions)
    pub engine: Arc<ComandaEngine>,
}

impl ServerState {
    /// Create server state from already-built services
    ///
    /// Normally [`initialize()`](Self::initialize) is used instead.
    pub fn new(
        config: Config,
        db: DbService,
        sessions: Arc<SessionStore>,
        engine: Arc<ComandaEngine>,
    ) -> Self {
        Self {
            config,
            db,
            sessions,
            engine,
        }
    }

    /// Initialize server state
    ///
    /// In order:
    /// 1. Work directory
    /// 2. Database (pool + migrations)
    /// 3. Seed the admin account if no admin exists
    /// 4. Session store and comanda engine
    ///
    /// # Panics
    ///
    /// Panics when the work directory or the database cannot be set up;
    /// the server is not usable without them.
    pub async fn initialize(config: &Config) -> Self {
        // 1. Ensure the work directory exists
        std::fs::create_dir_all(&config.work_dir).expect("Failed to create work directory");

        // 2. Initialize the database
        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        // 3. Make sure an administrator can log in
        bootstrap_admin(&db.pool)
            .await
            .expect("Failed to seed admin account");

        // 4. Sessions and the comanda engine
        let sessions = Arc::new(SessionStore::new(config.session_ttl_minutes));
        let engine = Arc::new(ComandaEngine::new(db.pool.clone()));

        Self::new(config.clone(), db, sessions, engine)
    }

    /// The SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// The working directory
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}

/// Seed the default admin account when the database has no active admin.
///
/// Without it a fresh install has no way to log in. The password is a
/// known default, so a warning is logged every time the seed runs.
async fn bootstrap_admin(pool: &SqlitePool) -> Result<(), AppError> {
    let admins: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM usuarios WHERE role = 'admin' AND is_active = 1")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
    if admins > 0 {
        return Ok(());
    }

    // The default username may be held by a demoted or disabled account;
    // never overwrite it
    let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM usuarios WHERE username = ?")
        .bind(DEFAULT_ADMIN_USERNAME)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if taken.is_some() {
        tracing::warn!(
            username = DEFAULT_ADMIN_USERNAME,
            "No active admin account and the default username is taken; restore an admin manually"
        );
        return Ok(());
    }

    let hash = password::hash_password(DEFAULT_ADMIN_PASSWORD)
        .map_err(|e| AppError::internal(format!("Failed to hash default password: {e}")))?;
    sqlx::query(
        "INSERT INTO usuarios (username, hash_pass, display_name, role, is_active) \
         VALUES (?, ?, ?, ?, 1)",
    )
    .bind(DEFAULT_ADMIN_USERNAME)
    .bind(hash)
    .bind("Administrador")
    .bind(UserRole::Admin)
    .execute(pool)
    .await
    .map_err(|e| AppError::database(e.to_string()))?;

    tracing::warn!(
        username = DEFAULT_ADMIN_USERNAME,
        "Seeded default admin account; change its password before going to production"
    );
    Ok(())
}
