use std::sync::Arc;

use hilo_core::Variant;
use hilo_session::VariantCoordinator;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::create_router;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::poller::Poller;

/// Run the service until Ctrl+C: one poller per variant plus the HTTP API.
pub async fn serve(config: ServerConfig) -> ServerResult<()> {
    let coordinator = Arc::new(VariantCoordinator::new(config.session.clone()));

    let mut pollers = Vec::with_capacity(Variant::ALL.len());
    for variant in Variant::ALL {
        let poller = Poller::new(variant, Arc::clone(&coordinator), &config)?;
        pollers.push(tokio::spawn(poller.run()));
    }

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(
        %addr,
        capacity = config.session.capacity,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        "hilo listening"
    );

    let result = axum::serve(listener, create_router(coordinator))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    for handle in &pollers {
        handle.abort();
    }
    result?;
    info!("hilo stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
