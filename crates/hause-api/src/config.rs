//! API configuration.

use std::time::Instant;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
    /// Public base URL used when registering inbound webhooks.
    pub public_base_url: String,
    /// Identity that community records are attributed to.
    pub operator_id: String,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl ApiConfig {
    /// Creates a new API configuration with the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Builds the configuration from environment variables, with defaults
    /// for anything unset.
    pub fn from_env() -> Self {
        let host =
            std::env::var("POWERHAUSE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("POWERHAUSE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);
        let cors_origins = std::env::var("FRONTEND_URL")
            .map(|url| vec![url])
            .unwrap_or_else(|_| vec!["*".to_string()]);
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let operator_id =
            std::env::var("OPERATOR_ID").unwrap_or_else(|_| "local-operator".to_string());

        Self {
            host,
            port,
            cors_origins,
            public_base_url,
            operator_id,
            start_time: Instant::now(),
        }
    }

    /// Sets the CORS origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Sets the public base URL.
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = url.into();
        self
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            public_base_url: "http://127.0.0.1:8000".to_string(),
            operator_id: "local-operator".to_string(),
            start_time: Instant::now(),
        }
    }
}
