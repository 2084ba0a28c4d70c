use std::path::Path;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "nurse_data=info";

/// Daily-rotating log file under `log_dir`. Creating the directory may fail.
pub fn rolling_file_appender(log_dir: &Path, file_prefix: &str) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(file_prefix)
        .build(log_dir)
}

/// Initializes the logging system with both console and file output.
///
/// When the log directory cannot be used only console output is installed.
/// The returned guard flushes the file writer when dropped, so `main` keeps it
/// alive for the whole run.
pub fn init_logging(log_dir: &Path, file_prefix: &str) -> Option<WorkerGuard> {
    let (file_layer, guard, file_error) = match rolling_file_appender(log_dir, file_prefix) {
        Ok(file_appender) => {
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            // JSON layer for file logging
            let layer = fmt::layer().json().with_writer(non_blocking_writer);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    // Create a formatted layer for console logging
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // Set the global default subscriber
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Some(e) = file_error {
        warn!(dir = %log_dir.display(), error = %e, "File logging disabled");
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_log_dir_that_is_a_file_is_an_error() {
        let dir = tempdir().unwrap();
        let not_a_dir = dir.path().join("logs");
        fs::write(&not_a_dir, "occupied").unwrap();

        assert!(rolling_file_appender(&not_a_dir, "nurse-data.log").is_err());
    }

    #[test]
    fn test_missing_log_dir_is_created() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        rolling_file_appender(&log_dir, "nurse-data.log").unwrap();
        assert!(log_dir.is_dir());
    }
}
