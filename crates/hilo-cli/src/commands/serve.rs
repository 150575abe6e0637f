use std::time::Duration;

use hilo_server::ServerConfig;
use hilo_server::telemetry::init_tracing;

/// Flags of `hilo serve`.
pub struct ServeArgs {
    pub host: String,
    pub port: u16,
    pub capacity: usize,
    pub poll_interval: u64,
    pub retry_delay: u64,
    pub timeout: u64,
    pub upstream: Option<String>,
    pub log_json: bool,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::default()
            .with_host(self.host)
            .with_port(self.port)
            .with_capacity(self.capacity)
            .with_poll_interval(Duration::from_secs(self.poll_interval))
            .with_retry_delay(Duration::from_secs(self.retry_delay))
            .with_request_timeout(Duration::from_secs(self.timeout))
            .with_log_json(self.log_json);
        if let Some(url) = self.upstream {
            config = config.with_upstream_url(url);
        }
        config
    }
}

pub fn run(args: ServeArgs) -> Result<(), String> {
    let config = args.into_config();
    init_tracing(config.log_json);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("cannot start async runtime: {e}"))?;
    runtime
        .block_on(hilo_server::serve(config))
        .map_err(|e| e.to_string())
}
