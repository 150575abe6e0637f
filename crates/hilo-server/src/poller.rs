use std::sync::Arc;
use std::time::Duration;

use hilo_core::Variant;
use hilo_session::{IngestOutcome, VariantCoordinator};
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::upstream::{ExtractState, NotifyResponse, PLATFORM_ID, extract_events};

const USER_AGENT: &str = concat!("hilo/", env!("CARGO_PKG_VERSION"));

/// Polls the notify endpoint for one variant and feeds the coordinator.
#[derive(Debug)]
pub struct Poller {
    variant: Variant,
    coordinator: Arc<VariantCoordinator>,
    client: reqwest::Client,
    url: String,
    poll_interval: Duration,
    retry_delay: Duration,
    state: ExtractState,
}

impl Poller {
    /// Build a poller with its own HTTP client.
    pub fn new(
        variant: Variant,
        coordinator: Arc<VariantCoordinator>,
        config: &ServerConfig,
    ) -> ServerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            variant,
            coordinator,
            client,
            url: config.upstream_url.clone(),
            poll_interval: config.poll_interval,
            retry_delay: config.retry_delay,
            state: ExtractState::default(),
        })
    }

    /// Extraction state carried between polls.
    pub fn state(&self) -> &ExtractState {
        &self.state
    }

    /// Fetch and decode one notification.
    pub async fn fetch(&self) -> ServerResult<NotifyResponse> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("platform_id", PLATFORM_ID), ("gid", self.variant.gid())])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<NotifyResponse>().await?)
    }

    /// Extract events from a notification and ingest them. Returns the
    /// number of records appended.
    pub fn apply(&mut self, response: &NotifyResponse) -> usize {
        let mut applied = 0;
        for event in extract_events(self.variant, response, &mut self.state) {
            match self.coordinator.ingest(self.variant, &event) {
                IngestOutcome::Applied(record) => {
                    applied += 1;
                    info!(
                        variant = %self.variant,
                        session_id = record.current_session,
                        dice_sum = record.dice_sum,
                        label = %record.label,
                        predicted = %record.predicted_label,
                        confidence = record.confidence,
                        history_len = self.coordinator.history_len(self.variant),
                        "result applied"
                    );
                }
                IngestOutcome::Duplicate { session_id } => {
                    debug!(variant = %self.variant, session_id, "duplicate session skipped");
                }
            }
        }
        applied
    }

    /// One fetch-and-apply cycle.
    pub async fn poll_once(&mut self) -> ServerResult<usize> {
        let response = self.fetch().await?;
        if !response.is_ok() {
            let status = response.status.unwrap_or_else(|| "missing".to_string());
            return Err(ServerError::UpstreamStatus(status));
        }
        Ok(self.apply(&response))
    }

    /// Poll forever. Failures are logged and followed by the retry delay.
    pub async fn run(mut self) {
        info!(variant = %self.variant, url = %self.url, "poller started");
        loop {
            if let Err(e) = self.poll_once().await {
                error!(variant = %self.variant, error = %e, "upstream poll failed");
                tokio::time::sleep(self.retry_delay).await;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
