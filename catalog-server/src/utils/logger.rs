//! Logging Infrastructure
//!
//! Structured logging for development and production:
//! - Console output (pretty, or JSON in production)
//! - Daily rotating application logs (deleted after 14 days)
//! - Permanent audit logs (`target: "audit"`, never deleted)

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Days an application log file is kept
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Clean up application log files older than [`APP_LOG_RETENTION_DAYS`]
///
/// Only `app/app.YYYY-MM-DD*` files are touched; audit logs are kept forever.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);

    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date) = app_log_date(name)
            && date < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(removed)
}

/// Date of a rolled application log file ("app.2026-01-31" or "app-2026-01-31.log")
fn app_log_date(file_name: &str) -> Option<chrono::NaiveDate> {
    let rest = file_name
        .strip_prefix("app.")
        .or_else(|| file_name.strip_prefix("app-"))?;
    let date_part = rest.get(..10)?;
    chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Default filter when `RUST_LOG` is unset (e.g. "info", "catalog_server=debug")
/// * `json_format` - JSON console output (production)
/// * `log_dir` - Optional directory for file logging (e.g. `./work_dir/logs`)
///
/// # Examples
/// ```no_run
/// use catalog_server::utils::logger::init_logger_with_file;
///
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None).unwrap();
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };
    layers.push(console_layer);

    if let Some(log_dir) = log_dir {
        let app_log_dir = log_dir.join("app");
        let audit_log_dir = log_dir.join("audit");
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&audit_log_dir)?;

        // Application logs: everything except audit events
        let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "audit"
                }))
                .boxed(),
        );

        // Audit logs: category mutations
        let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_log_dir, "audit");
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(false)
                .with_writer(std::sync::Mutex::new(audit_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "audit"
                }))
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    if let Some(log_dir) = log_dir {
        if let Err(e) = cleanup_old_logs(log_dir) {
            tracing::warn!(error = %e, "Initial log cleanup failed");
        }
        tokio::spawn(periodic_cleanup(log_dir.to_path_buf()));
    }

    Ok(())
}

/// Runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_log_date() {
        let expected = chrono::NaiveDate::from_ymd_opt(2026, 1, 31);
        assert_eq!(app_log_date("app.2026-01-31"), expected);
        assert_eq!(app_log_date("app-2026-01-31.log"), expected);
        assert_eq!(app_log_date("audit.2026-01-31"), None);
        assert_eq!(app_log_date("app.latest"), None);
    }

    #[test]
    fn test_cleanup_old_logs() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("app");
        let audit_dir = dir.path().join("audit");
        fs::create_dir_all(&app_dir).unwrap();
        fs::create_dir_all(&audit_dir).unwrap();

        let today = chrono::Local::now().date_naive();
        let old = today - chrono::Duration::days(APP_LOG_RETENTION_DAYS + 5);
        let old_app = app_dir.join(format!("app.{}", old.format("%Y-%m-%d")));
        let fresh_app = app_dir.join(format!("app.{}", today.format("%Y-%m-%d")));
        let old_audit = audit_dir.join(format!("audit.{}", old.format("%Y-%m-%d")));
        for path in [&old_app, &fresh_app, &old_audit] {
            fs::write(path, "{}\n").unwrap();
        }

        assert_eq!(cleanup_old_logs(dir.path()).unwrap(), 1);
        assert!(!old_app.exists());
        assert!(fresh_app.exists());
        assert!(old_audit.exists());
    }
}
