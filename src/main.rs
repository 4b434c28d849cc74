use dotenv::dotenv;
use pobeda_backend::app::app::App;
use pobeda_backend::util::logger::Logger;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before the logger reads LOG_DIR / RUST_LOG
    let dotenv_result = dotenv();

    let _logger = match Logger::new() {
        Ok(logger) => Some(logger),
        Err(e) => {
            let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
            warn!("⚠️ File logging unavailable: {} (console only)", e);
            None
        }
    };

    info!("🚀 Starting Pobeda lead backend");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match app.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
