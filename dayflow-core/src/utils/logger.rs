//! Logging Infrastructure
//!
//! Structured logging setup. Console output goes to stderr so CLI output on
//! stdout stays machine-readable.

use std::path::Path;

/// Initialize the logger with optional JSON formatting and file output
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level
        .unwrap_or("info")
        .parse()
        .unwrap_or(tracing::Level::INFO);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
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
            let file_appender = tracing_appender::rolling::daily(dir_str, "dayflow");
            let _ = subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .try_init();
            return;
        }
    }

    if json.unwrap_or(false) {
        let _ = subscriber.json().with_writer(std::io::stderr).try_init();
    } else {
        let _ = subscriber.with_writer(std::io::stderr).try_init();
    }
}
