//! Logging Infrastructure
//!
//! Structured logging setup for development and production:
//! - Daily rotating application logs (deleted after 14 days)
//! - Permanent audit logs (never deleted) - duty overrides land here via
//!   `tracing::warn!(target: "audit", ...)`

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

/// Clean up application log files older than 14 days
///
/// Audit logs are never touched.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    use chrono::{Local, TimeZone};

    let cutoff = Local::now() - chrono::Duration::days(14);

    let app_log_dir = log_dir.join("app");
    if app_log_dir.exists() {
        for entry in fs::read_dir(app_log_dir)? {
            let entry = entry?;
            let path = entry.path();

            if let Some(name) = path.file_name().and_then(|n| n.to_str())
                && name.starts_with("app.")
                && let Some(date_part) = name.strip_prefix("app.")
                && let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                && let Some(local_datetime) = Local
                    .from_local_datetime(&naive_date.and_hms_opt(0, 0, 0).unwrap())
                    .single()
                && local_datetime < cutoff
            {
                fs::remove_file(&path)?;
                tracing::info!(file = %name, "Deleted old log file");
            }
        }
    }

    Ok(())
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g. "info", "debug", "warn")
/// * `json_format` - JSON output (production) vs pretty output (development)
/// * `log_dir` - Optional directory for file logging
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(level));

        if let Some(dir) = log_dir {
            let (app_dir, audit_dir) = prepare_log_dirs(dir)?;

            // Daily rotating application logs, subject to 14-day cleanup
            let app_log = RollingFileAppender::new(Rotation::DAILY, app_dir, "app");
            let app_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "audit"
                }));

            // Permanent audit logs (never deleted)
            let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_dir, "audit");
            let audit_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(audit_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "audit"
                }));

            tokio::spawn(periodic_cleanup(Path::new(dir).to_path_buf()));

            subscriber
                .with(console_layer)
                .with(app_layer)
                .with(audit_layer)
                .init();
        } else {
            subscriber.with(console_layer).init();
        }
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(level));

        if let Some(dir) = log_dir {
            let (app_dir, audit_dir) = prepare_log_dirs(dir)?;

            let app_log = RollingFileAppender::new(Rotation::DAILY, app_dir, "app");
            let app_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "audit"
                }));

            let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_dir, "audit");
            let audit_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(audit_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "audit"
                }));

            tokio::spawn(periodic_cleanup(Path::new(dir).to_path_buf()));

            subscriber
                .with(console_layer)
                .with(app_layer)
                .with(audit_layer)
                .init();
        } else {
            subscriber.with(console_layer).init();
        }
    }

    Ok(())
}

fn prepare_log_dirs(dir: &str) -> anyhow::Result<(PathBuf, PathBuf)> {
    let log_dir = Path::new(dir);
    let app_dir = log_dir.join("app");
    let audit_dir = log_dir.join("audit");
    fs::create_dir_all(&app_dir)?;
    fs::create_dir_all(&audit_dir)?;
    Ok((app_dir, audit_dir))
}

/// Periodic cleanup task - runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}
