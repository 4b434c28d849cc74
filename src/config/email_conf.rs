use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};
use validator::ValidateEmail;

use crate::config::ConfigError;

pub const DEFAULT_RECIPIENT_EMAIL: &str = "info@pobedallc.com";
pub const DEFAULT_SENDER_EMAIL: &str = "noreply@pobedallc.com";
pub const DEFAULT_SENDER_NAME: &str = "Pobeda LLC";

/// Which dispatcher delivers formatted submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailTransportKind {
    Smtp,
    /// Logs the message instead of sending it
    Console,
}

impl std::str::FromStr for EmailTransportKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smtp" => Ok(EmailTransportKind::Smtp),
            "console" => Ok(EmailTransportKind::Console),
            other => Err(ConfigError::InvalidValue(format!(
                "Unknown EMAIL_TRANSPORT value: {}",
                other
            ))),
        }
    }
}

/// SMTP relay settings; only present when host and credentials are all set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub use_tls: bool,
    pub use_starttls: bool,
    pub connection_timeout_secs: u64,
}

/// Email configuration for lead notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Address every submission is delivered to
    pub recipient_email: String,
    /// From address
    pub sender_email: String,
    /// From name (display name)
    pub sender_name: String,
    pub transport: EmailTransportKind,
    /// Missing credentials leave this empty; dispatch then fails closed
    pub smtp: Option<SmtpSettings>,
}

impl EmailConfig {
    /// Create EmailConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create EmailConfig from an arbitrary key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Loading email configuration");

        let recipient_email = lookup("RECIPIENT_EMAIL").unwrap_or_else(|| {
            warn!("RECIPIENT_EMAIL not set, defaulting to {}", DEFAULT_RECIPIENT_EMAIL);
            DEFAULT_RECIPIENT_EMAIL.to_string()
        });
        debug!("Recipient email: {}", recipient_email);

        let sender_email = lookup("SENDER_EMAIL").unwrap_or_else(|| {
            warn!("SENDER_EMAIL not set, defaulting to {}", DEFAULT_SENDER_EMAIL);
            DEFAULT_SENDER_EMAIL.to_string()
        });
        debug!("Sender email: {}", sender_email);

        let sender_name = lookup("SENDER_NAME").unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string());
        debug!("Sender name: {}", sender_name);

        let transport = match lookup("EMAIL_TRANSPORT") {
            Some(value) => value.parse::<EmailTransportKind>().map_err(|e| {
                error!("Invalid EMAIL_TRANSPORT value");
                e
            })?,
            None => {
                warn!("EMAIL_TRANSPORT not set, defaulting to smtp");
                EmailTransportKind::Smtp
            }
        };
        debug!("Email transport: {:?}", transport);

        let smtp = Self::smtp_from_lookup(&lookup)?;

        let config = EmailConfig {
            recipient_email,
            sender_email,
            sender_name,
            transport,
            smtp,
        };

        config.validate()?;
        info!("Email configuration loaded successfully");
        Ok(config)
    }

    fn smtp_from_lookup<F>(lookup: &F) -> Result<Option<SmtpSettings>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SMTP_HOST").filter(|v| !v.is_empty());
        let username = lookup("SMTP_USERNAME").filter(|v| !v.is_empty());
        let password = lookup("SMTP_PASSWORD").filter(|v| !v.is_empty());

        let (host, username, password) = match (host, username, password) {
            (Some(h), Some(u), Some(p)) => (h, u, p),
            _ => {
                warn!("SMTP_HOST/SMTP_USERNAME/SMTP_PASSWORD incomplete, SMTP delivery disabled");
                return Ok(None);
            }
        };
        debug!("SMTP host: {}", host);
        debug!("SMTP username: {}", username);
        debug!("SMTP password: [REDACTED]");

        let port = lookup("SMTP_PORT")
            .unwrap_or_else(|| {
                warn!("SMTP_PORT not set, defaulting to 587");
                "587".to_string()
            })
            .parse::<u16>()
            .map_err(|_| {
                error!("Invalid SMTP_PORT value");
                ConfigError::InvalidValue("Invalid SMTP_PORT value".to_string())
            })?;
        debug!("SMTP port: {}", port);

        let use_tls = lookup("SMTP_USE_TLS")
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);
        let use_starttls = lookup("SMTP_USE_STARTTLS")
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);
        debug!("SMTP use TLS: {}, STARTTLS: {}", use_tls, use_starttls);

        let connection_timeout_secs = lookup("SMTP_CONNECTION_TIMEOUT")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);
        debug!("Connection timeout: {} seconds", connection_timeout_secs);

        Ok(Some(SmtpSettings {
            host,
            port,
            username,
            password,
            use_tls,
            use_starttls,
            connection_timeout_secs,
        }))
    }

    /// Create EmailConfig for testing
    pub fn from_test_env() -> Self {
        EmailConfig {
            recipient_email: "leads@example.com".to_string(),
            sender_email: "test@example.com".to_string(),
            sender_name: "Test App".to_string(),
            transport: EmailTransportKind::Console,
            smtp: Some(SmtpSettings {
                host: "localhost".to_string(),
                port: 1025,
                username: "test".to_string(),
                password: "test".to_string(),
                use_tls: false,
                use_starttls: false,
                connection_timeout_secs: 10,
            }),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.recipient_email.validate_email() {
            error!("Invalid recipient email format");
            return Err(ConfigError::ValidationError("Invalid recipient email format".to_string()));
        }

        if !self.sender_email.validate_email() {
            error!("Invalid sender email format");
            return Err(ConfigError::ValidationError("Invalid sender email format".to_string()));
        }

        if let Some(smtp) = &self.smtp {
            if smtp.port == 0 {
                error!("SMTP port is 0");
                return Err(ConfigError::ValidationError("SMTP port cannot be 0".to_string()));
            }
            if smtp.connection_timeout_secs == 0 {
                error!("Connection timeout is 0");
                return Err(ConfigError::ValidationError("Connection timeout cannot be 0".to_string()));
            }
        }

        Ok(())
    }

    /// Get SMTP server URL, if SMTP is configured
    pub fn smtp_url(&self) -> Option<String> {
        self.smtp.as_ref().map(|s| format!("{}:{}", s.host, s.port))
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            recipient_email: DEFAULT_RECIPIENT_EMAIL.to_string(),
            sender_email: DEFAULT_SENDER_EMAIL.to_string(),
            sender_name: DEFAULT_SENDER_NAME.to_string(),
            transport: EmailTransportKind::Smtp,
            smtp: None,
        }
    }
}
