//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional JSON output and file output
///
/// With `log_dir` set (and existing), log lines go to a daily-rotated
/// `comanda-server.*` file in that directory instead of stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let json = json.unwrap_or(false);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "comanda-server");
            if json {
                subscriber.json().with_writer(file_appender).init();
            } else {
                subscriber.with_writer(file_appender).init();
            }
            return;
        }
    }

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
