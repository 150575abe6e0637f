use std::time::Duration;

use hilo_session::SessionConfig;

use crate::upstream::DEFAULT_UPSTREAM_URL;

/// Configuration for a running service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface the HTTP API binds to.
    pub host: String,
    /// Port the HTTP API binds to.
    pub port: u16,
    /// Base URL of the upstream notify endpoint.
    pub upstream_url: String,
    /// Pause between two polls of the same variant.
    pub poll_interval: Duration,
    /// Extra pause after a failed poll.
    pub retry_delay: Duration,
    /// Timeout for one upstream request.
    pub request_timeout: Duration,
    /// History store settings.
    pub session: SessionConfig,
    /// Emit logs as JSON lines.
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            poll_interval: Duration::from_secs(5),
            retry_delay: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            session: SessionConfig::default(),
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// Set the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the upstream base URL.
    pub fn with_upstream_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_url = url.into();
        self
    }

    /// Set the pause between polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the extra pause after a failed poll.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set the upstream request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the per-variant history capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.session = self.session.with_capacity(capacity);
        self
    }

    /// Switch JSON log output on or off.
    pub fn with_log_json(mut self, json: bool) -> Self {
        self.log_json = json;
        self
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
