//! Tracing bootstrap.

use std::fs::{create_dir_all, File, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use crate::config::ObservabilityConfig;

/// Overrides `observability.log_file` when set and non-empty.
pub const LOG_FILE_ENV: &str = "AGENT_LOG_FILE";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Install the global fmt subscriber once. Later calls are no-ops.
///
/// `RUST_LOG` wins over the configured level. Logs go to the configured file
/// (append mode) or to stderr, keeping stdout for answers.
pub fn init_tracing(observability: &ObservabilityConfig) {
    TRACING_INIT.get_or_init(|| {
        let log_file_path = std::env::var(LOG_FILE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| observability.log_file.clone());
        let file_writer = log_file_path.as_deref().and_then(create_log_writer);
        let fallback_level = match observability.log_level.trim().to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            "off" => "off",
            _ => "info",
        };

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(fallback_level))
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        match file_writer {
            Some(writer) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer)
                    .try_init();
            }
            None => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .try_init();
            }
        }

        tracing::info!(
            log_level = %observability.log_level,
            log_file = log_file_path.as_deref().unwrap_or("(stderr)"),
            "tracing initialized"
        );
    });
}

fn create_log_writer(path: &str) -> Option<Mutex<File>> {
    let file_path = Path::new(path);
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = create_dir_all(parent) {
                eprintln!(
                    "failed to create log directory '{}': {}",
                    parent.display(),
                    err
                );
                return None;
            }
        }
    }
    match OpenOptions::new().create(true).append(true).open(file_path) {
        Ok(file) => Some(Mutex::new(file)),
        Err(err) => {
            eprintln!("failed to open log file '{}': {}", file_path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_writer_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/logs/agent.log");
        assert!(create_log_writer(path.to_str().unwrap()).is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = ObservabilityConfig {
            log_level: "off".to_string(),
            log_file: None,
        };
        init_tracing(&config);
        init_tracing(&config);
    }
}
