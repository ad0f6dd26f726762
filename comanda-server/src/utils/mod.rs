//! Utility module
//!
//! # Contents
//!
//! - [`logger`] - tracing subscriber setup
//! - [`setup_environment`] - dotenv + logging bootstrap for main()

pub mod logger;

/// Prepare the process environment: load `.env`, then initialize logging.
///
/// Logging is configured from `LOG_LEVEL`, `LOG_JSON` and `LOG_DIR`;
/// see [`logger::init_logger_with_file`].
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_json = std::env::var("LOG_JSON").ok().and_then(|v| v.parse().ok());
    let log_dir = std::env::var("LOG_DIR").ok();

    logger::init_logger_with_file(log_level.as_deref(), log_json, log_dir.as_deref());
    Ok(())
}
