use axum::Router;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, ConfigError, EmailConfig};
use crate::router::mail_router::mail_router;
use crate::service::submission_service::{SubmissionService, SubmissionServiceImpl};
use crate::util::email::{build_dispatcher, EmailDispatcher};

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub fn new() -> Result<Self, ConfigError> {
        let config = AppConfig::from_env();
        let email_config = EmailConfig::from_env()?;
        info!(
            recipient = %email_config.recipient_email,
            transport = ?email_config.transport,
            "Lead notifications configured"
        );
        let dispatcher = build_dispatcher(&email_config);
        Ok(Self::with_dispatcher(config, dispatcher))
    }

    /// Assemble the app around an already-built dispatcher
    pub fn with_dispatcher(config: AppConfig, dispatcher: Arc<dyn EmailDispatcher>) -> Self {
        let service: Arc<dyn SubmissionService> = Arc::new(SubmissionServiceImpl::new(dispatcher));
        let router = mail_router(service, &config.mail_endpoint);
        App { config, router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn start(self) -> std::io::Result<()> {
        let host = self
            .config
            .host
            .parse::<IpAddr>()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Invalid host: {}", e)))?;
        let addr = SocketAddr::new(host, self.config.port);
        info!("🚀 Server running at http://{}{}", addr, self.config.mail_endpoint);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}
