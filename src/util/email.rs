use crate::config::{ConfigError, EmailConfig, EmailTransportKind};
use crate::model::EmailContent;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Email delivery is not configured: {0}")]
    NotConfigured(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// Hands a formatted notification to whatever delivers mail.
///
/// Sender and recipient are fixed at construction; callers only supply content.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    async fn dispatch(&self, content: &EmailContent) -> Result<(), EmailError>;
}

/// Pick the dispatcher the configuration asks for.
///
/// SMTP without usable credentials degrades to a dispatcher that fails every
/// send, so a missing secret never stops the server from starting.
pub fn build_dispatcher(config: &EmailConfig) -> Arc<dyn EmailDispatcher> {
    match config.transport {
        EmailTransportKind::Console => {
            info!("Using console email dispatcher");
            Arc::new(ConsoleEmailService::new(config))
        }
        EmailTransportKind::Smtp => match SmtpEmailService::new(config.clone()) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                warn!("SMTP dispatcher unavailable, submissions will fail: {}", e);
                Arc::new(UnconfiguredEmailService::new(e.to_string()))
            }
        },
    }
}

/// SMTP email service implementation
pub struct SmtpEmailService {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    /// Create a new SMTP email service
    #[instrument(skip(config), fields(smtp = ?config.smtp_url()))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");

        config.validate().map_err(EmailError::from)?;

        let smtp = config
            .smtp
            .clone()
            .ok_or_else(|| EmailError::NotConfigured("SMTP host or credentials missing".to_string()))?;

        let mut transport_builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
            .port(smtp.port)
            .timeout(Some(std::time::Duration::from_secs(smtp.connection_timeout_secs)));

        if smtp.use_tls {
            let tls_parameters = TlsParameters::new(smtp.host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;

            if smtp.use_starttls {
                transport_builder = transport_builder.tls(Tls::Required(tls_parameters));
            } else {
                transport_builder = transport_builder.tls(Tls::Wrapper(tls_parameters));
            }
        } else {
            transport_builder = transport_builder.tls(Tls::None);
        }

        let credentials = Credentials::new(smtp.username.clone(), smtp.password.clone());
        let transport = transport_builder.credentials(credentials).build();

        info!("SMTP email service initialized successfully");
        Ok(Self { config, transport })
    }

    /// Build a multipart text + HTML message addressed to the lead inbox
    pub fn build_message(&self, content: &EmailContent) -> Result<Message, EmailError> {
        let from_mailbox: Mailbox = format!("{} <{}>", self.config.sender_name, self.config.sender_email)
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))?;

        let to_mailbox: Mailbox = self
            .config
            .recipient_email
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

        Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(&content.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(content.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(content.html.clone()),
                    ),
            )
            .map_err(|e| EmailError::MessageError(format!("Failed to build multipart message: {}", e)))
    }
}

#[async_trait]
impl EmailDispatcher for SmtpEmailService {
    #[instrument(skip(self, content), fields(to = %self.config.recipient_email, subject = %content.subject))]
    async fn dispatch(&self, content: &EmailContent) -> Result<(), EmailError> {
        let message = self.build_message(content)?;

        self.transport.send(message).await.map_err(|e| {
            error!("Failed to send email: {}", e);
            EmailError::SmtpError(format!("Failed to send email: {}", e))
        })?;

        info!("Email sent successfully");
        Ok(())
    }
}

/// Logs notifications instead of delivering them; for local development
pub struct ConsoleEmailService {
    recipient: String,
}

impl ConsoleEmailService {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            recipient: config.recipient_email.clone(),
        }
    }
}

#[async_trait]
impl EmailDispatcher for ConsoleEmailService {
    async fn dispatch(&self, content: &EmailContent) -> Result<(), EmailError> {
        info!(
            to = %self.recipient,
            subject = %content.subject,
            "Email would be sent:\n{}",
            content.text
        );
        Ok(())
    }
}

/// Fails every dispatch with the reason delivery could not be set up
pub struct UnconfiguredEmailService {
    reason: String,
}

impl UnconfiguredEmailService {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl EmailDispatcher for UnconfiguredEmailService {
    async fn dispatch(&self, content: &EmailContent) -> Result<(), EmailError> {
        error!(subject = %content.subject, "Dropping email, delivery not configured: {}", self.reason);
        Err(EmailError::NotConfigured(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_content() -> EmailContent {
        EmailContent {
            subject: "New Cost Calculation Request - Pobeda LLC".to_string(),
            html: "<h2>New Cost Calculation Request</h2>".to_string(),
            text: "Square Meters: 150".to_string(),
        }
    }

    #[tokio::test]
    async fn test_console_dispatch_succeeds() {
        let config = EmailConfig::from_test_env();
        let dispatcher = ConsoleEmailService::new(&config);
        assert!(dispatcher.dispatch(&sample_content()).await.is_ok());
    }

    #[tokio::test]
    async fn test_unconfigured_dispatch_fails_closed() {
        let dispatcher = UnconfiguredEmailService::new("SMTP host or credentials missing");
        let result = dispatcher.dispatch(&sample_content()).await;
        assert!(matches!(result, Err(EmailError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_smtp_without_credentials_is_not_configured() {
        let config = EmailConfig::default();
        let result = SmtpEmailService::new(config);
        assert!(matches!(result, Err(EmailError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_build_dispatcher_degrades_without_credentials() {
        let dispatcher = build_dispatcher(&EmailConfig::default());
        assert!(dispatcher.dispatch(&sample_content()).await.is_err());
    }

    #[tokio::test]
    async fn test_build_message_multipart() {
        let mut config = EmailConfig::from_test_env();
        config.transport = EmailTransportKind::Smtp;
        let service = SmtpEmailService::new(config).expect("test smtp service");
        let message = service.build_message(&sample_content()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: New Cost Calculation Request - Pobeda LLC"));
        assert!(raw.contains("To: leads@example.com"));
        assert!(raw.contains("multipart/alternative"));
    }
}
