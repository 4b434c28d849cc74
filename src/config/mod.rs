pub mod app_conf;
pub mod email_conf;

pub use app_conf::AppConfig;
pub use email_conf::{EmailConfig, EmailTransportKind, SmtpSettings};

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
