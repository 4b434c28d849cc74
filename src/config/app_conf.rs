use std::env;
use tracing::warn;

pub const DEFAULT_MAIL_ENDPOINT: &str = "/api/mail";
pub const HEALTH_ENDPOINT: &str = "/health";

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Path the form client posts submissions to
    pub mail_endpoint: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("APP_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let mail_endpoint = match lookup("MAIL_ENDPOINT") {
            Some(path) if is_static_route(&path) => path,
            Some(path) => {
                warn!("MAIL_ENDPOINT {:?} is not a usable route, using {}", path, DEFAULT_MAIL_ENDPOINT);
                DEFAULT_MAIL_ENDPOINT.to_string()
            }
            None => DEFAULT_MAIL_ENDPOINT.to_string(),
        };
        AppConfig { host, port, mail_endpoint }
    }
}

/// A literal path the router can register next to the health check.
fn is_static_route(path: &str) -> bool {
    path.starts_with('/')
        && path != HEALTH_ENDPOINT
        && !path.contains(['{', '}'])
        && path
            .split('/')
            .all(|segment| !segment.starts_with(':') && !segment.starts_with('*'))
}
