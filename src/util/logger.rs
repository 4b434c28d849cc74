use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Console plus rolling file logging. Keep the value alive for the life of
/// the process; dropping it flushes and stops the file writers.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let guards = Self::setup_logging(&log_dir)?;
        Ok(Logger { guards })
    }

    pub fn setup_logging(log_dir: &str) -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
        let error_dir = format!("{}/error", log_dir);
        std::fs::create_dir_all(&error_dir)?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,pobeda_backend=debug"));
        let file_log_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());
        let error_file_log_level = std::env::var("ERROR_FILE_LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        let (general_writer, general_guard) = non_blocking(rolling::daily(log_dir, "pobeda-backend.log"));
        let (error_writer, error_guard) = non_blocking(rolling::daily(&error_dir, "pobeda-backend-error.log"));
        let (json_writer, json_guard) = non_blocking(rolling::daily(log_dir, "pobeda-backend.json"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(true)
                    .with_filter(console_filter),
            )
            .with(
                fmt::layer()
                    .with_writer(general_writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .with_writer(error_writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&error_file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(json_writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .try_init()?;

        Ok(vec![general_guard, error_guard, json_guard])
    }
}
