//! Logging Infrastructure
//!
//! Structured logging setup: stdout by default, daily-rolling files when a
//! log directory is configured and exists.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "docvault-server");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        subscriber.init();
        tracing::warn!("Log directory {dir} does not exist, logging to stdout");
        return;
    }

    subscriber.init();
}

fn default_directives(level: &str) -> String {
    format!("docvault_server={level},tower_http={level},sqlx=warn")
}
